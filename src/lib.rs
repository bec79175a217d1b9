// src/lib.rs
//! GPU Game of Life
//!
//! Conway's Game of Life computed entirely on the GPU with wgpu. Cell state
//! lives in a pair of RGBA8 textures; each generation is one fullscreen
//! fragment pass from the front texture into the back texture, followed by a
//! swap and a second pass that maps the state to display colours.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod performance;
pub mod simulation;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::LifeApp;
pub use config::LifeConfig;
pub use error::{LifeError, LifeResult};
pub use simulation::{CellGrid, LifeSimulation, Pattern};

/// Opens a window and runs the simulation until it is closed
pub fn run(config: LifeConfig) -> LifeResult<()> {
    LifeApp::new(config)?.run()
}
