//! # Error Types
//!
//! Every fallible operation in the crate returns [`LifeResult`]. All of these
//! errors are fatal: they abort startup and are reported to the operator.

use thiserror::Error;

/// Main error type for the GPU Game of Life
#[derive(Error, Debug)]
pub enum LifeError {
    /// Configuration rejected before any GPU resource was created
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No adapter matched the request
    #[error("No suitable GPU adapter found: {0}")]
    Adapter(String),

    /// Adapter found but device creation failed
    #[error("Failed to create GPU device: {0}")]
    Device(String),

    /// Window surface could not be created or configured
    #[error("Surface error: {0}")]
    Surface(String),

    /// Kernel source failed to compile or the pipeline failed to link.
    /// `message` carries the compiler diagnostics verbatim.
    #[error("Shader compilation failed for {kernel} kernel:\n{message}")]
    ShaderCompilation { kernel: String, message: String },

    /// State texture cannot be used as a render target
    #[error("Render target unsupported: {0}")]
    RenderTarget(String),

    /// Copying a texture back to the CPU failed
    #[error("GPU readback failed: {0}")]
    Readback(String),

    /// A CPU grid does not match the simulation dimensions
    #[error("Grid size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    GridSize {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    /// Window or event loop failure
    #[error("Window error: {0}")]
    Window(String),
}

/// Result type for Game of Life operations
pub type LifeResult<T> = Result<T, LifeError>;

impl LifeError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a shader compilation error for the named kernel
    pub fn shader(kernel: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ShaderCompilation {
            kernel: kernel.into(),
            message: message.into(),
        }
    }

    /// Create a render target error
    pub fn render_target(msg: impl Into<String>) -> Self {
        Self::RenderTarget(msg.into())
    }

    /// Create a readback error
    pub fn readback(msg: impl Into<String>) -> Self {
        Self::Readback(msg.into())
    }

    /// Create a window error
    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }
}
