// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles the state textures and their readback.

pub mod texture_resource;

// Re-export main types
pub use texture_resource::{read_rgba, TextureResource};
