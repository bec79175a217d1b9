// src/wgpu_utils/error_scope.rs
//! Validation error capture
//!
//! wgpu reports shader and resource validation failures asynchronously through
//! error scopes. Wrapping resource creation in a scope turns those reports into
//! values the caller can convert into a typed error instead of the default
//! uncaptured-error panic.

/// Runs `create` inside a validation error scope.
///
/// Returns the created value together with the first validation error raised
/// while it was being created, if any.
pub fn validation_scope<T>(
    device: &wgpu::Device,
    create: impl FnOnce() -> T,
) -> (T, Option<wgpu::Error>) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    let error = pollster::block_on(device.pop_error_scope());
    (value, error)
}
