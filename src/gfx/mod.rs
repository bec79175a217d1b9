//! # Graphics Module
//!
//! Everything that touches the GPU: device acquisition, the state textures,
//! the two kernels and the ping-pong render targets.
//!
//! ## Architecture Overview
//!
//! - **Context** ([`context`]) - Instance, adapter, device and queue
//! - **Resources** ([`resources`]) - State textures with repeat/nearest sampling
//! - **Rendering** ([`rendering`]) - Kernels, fullscreen quad, ping-pong targets
//!
//! ## Usage
//!
//! ```no_run
//! use gpu_life::gfx::GpuContext;
//!
//! let gpu = GpuContext::headless().expect("no GPU adapter");
//! println!("running on {}", gpu.adapter_info().name);
//! ```

pub mod context;
pub mod rendering;
pub mod resources;

// Re-export commonly used types
pub use context::GpuContext;
pub use rendering::{DisplayKernel, PingPongTargets, UpdateKernel};
pub use resources::TextureResource;
