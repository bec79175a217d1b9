// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Small wrappers around uniform buffers, binding types and validation error
//! scopes shared by the kernels and the render targets.

pub mod binding_types;
pub mod error_scope;
pub mod uniform_buffer;

// Re-export main types
pub use binding_types::*;
pub use error_scope::validation_scope;
pub use uniform_buffer::UniformBuffer;
