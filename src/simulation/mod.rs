// src/simulation/mod.rs
//! Simulation system
//!
//! The GPU driver ([`driver::LifeSimulation`]) and its CPU-side companion
//! ([`grid::CellGrid`]) used for seeding, readback and rule cross-checks.

pub mod driver;
pub mod grid;

pub use driver::LifeSimulation;
pub use grid::{CellGrid, Pattern};
