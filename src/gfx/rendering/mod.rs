// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Kernel pipelines, the update and display kernels, the fullscreen quad and
//! the ping-pong render targets they draw into.

pub mod kernel_pipeline;
pub mod kernels;
pub mod ping_pong;
pub mod vertex;

// Re-export main types
pub use kernel_pipeline::{KernelBinding, KernelConfig, KernelPipeline};
pub use kernels::{DisplayKernel, DisplayParams, FullscreenKernel, UpdateKernel, UpdateParams};
pub use ping_pong::PingPongTargets;
pub use vertex::{FullscreenQuad, Vertex2D};
