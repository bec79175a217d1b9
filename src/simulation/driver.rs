//! # Simulation Driver
//!
//! [`LifeSimulation`] owns every GPU resource of the simulation and runs the
//! per-frame sequence:
//!
//! 1. clear the visible target
//! 2. update pass: front → back, then swap
//! 3. display pass: newest front → visible target
//!
//! Steps 1–3 are recorded into one command encoder and submitted together,
//! so queue order guarantees the update pass finishes before the display
//! pass samples its output. Presenting and pacing belong to the caller.

use std::sync::Arc;

use crate::config::LifeConfig;
use crate::error::LifeResult;
use crate::gfx::rendering::{DisplayKernel, DisplayParams, PingPongTargets, UpdateKernel};
use crate::simulation::grid::CellGrid;

/// GPU Game of Life: state textures, kernels and the frame sequence
pub struct LifeSimulation {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    targets: PingPongTargets,
    update: UpdateKernel,
    display: DisplayKernel,
    clear_color: wgpu::Color,
    viewport: (u32, u32),
}

impl LifeSimulation {
    /// Builds kernels and state textures and uploads `seed` as generation 0.
    ///
    /// # Arguments
    /// * `config` - Grid and window dimensions plus display colours
    /// * `target_format` - Format of the visible target the display pass writes
    /// * `seed` - Initial state; must match the configured grid size
    ///
    /// # Errors
    /// Invalid configuration, shader compilation failure, an unsupported
    /// render target, or a seed of the wrong size. All are fatal.
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        config: &LifeConfig,
        target_format: wgpu::TextureFormat,
        seed: &CellGrid,
    ) -> LifeResult<Self> {
        config.validate_for_limits(&device.limits())?;

        let targets = PingPongTargets::new(&device, config.sim_width, config.sim_height)?;
        let update = UpdateKernel::new(&device, &targets)?;
        let display = DisplayKernel::new(
            &device,
            &targets,
            target_format,
            DisplayParams::new(
                config.window_width,
                config.window_height,
                config.alive_color,
                config.dead_color,
            ),
        )?;

        targets.upload(&queue, seed)?;
        log::info!(
            "Seeded {}x{} grid with {} live cells",
            seed.width(),
            seed.height(),
            seed.live_count()
        );

        Ok(Self {
            device,
            queue,
            targets,
            update,
            display,
            clear_color: to_wgpu_color(config.dead_color),
            viewport: (config.window_width, config.window_height),
        })
    }

    /// Advances exactly one generation without drawing
    pub fn step(&mut self) {
        let mut encoder = self.create_encoder("Step Encoder");
        self.targets.render_to_back(&mut encoder, &self.update);
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Draws the current front generation into `target` without stepping
    pub fn draw(&self, target: &wgpu::TextureView) {
        let mut encoder = self.create_encoder("Draw Encoder");
        self.targets.render_to_screen(
            &mut encoder,
            target,
            self.viewport,
            self.clear_color,
            &self.display,
        );
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// One full frame: advance a generation, then draw it into `target`
    pub fn frame(&mut self, target: &wgpu::TextureView) {
        let mut encoder = self.create_encoder("Frame Encoder");
        self.targets.render_to_back(&mut encoder, &self.update);
        self.targets.render_to_screen(
            &mut encoder,
            target,
            self.viewport,
            self.clear_color,
            &self.display,
        );
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Fills `target` with the dead colour (first frame, before any step)
    pub fn clear(&self, target: &wgpu::TextureView) {
        let mut encoder = self.create_encoder("Clear Encoder");
        {
            let _clear_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Adapts the display pass to a new visible target size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.display.resize(&self.queue, width, height);
        log::debug!("Display viewport resized to {}x{}", width, height);
    }

    /// Replaces the front generation with `grid`
    pub fn upload(&mut self, grid: &CellGrid) -> LifeResult<()> {
        self.targets.upload(&self.queue, grid)
    }

    /// Reads the newest generation back to the CPU (blocking)
    pub fn read_state(&self) -> LifeResult<CellGrid> {
        self.targets.read_front(&self.device, &self.queue)
    }

    /// Generations computed since creation
    pub fn generation(&self) -> u64 {
        self.targets.generation()
    }

    /// Index (0 or 1) of the state texture holding the newest generation
    pub fn front_index(&self) -> usize {
        self.targets.front_index()
    }

    /// Grid size in cells
    pub fn grid_size(&self) -> (u32, u32) {
        self.targets.size()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn create_encoder(&self, label: &str) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) })
    }
}

impl Drop for LifeSimulation {
    fn drop(&mut self) {
        log::info!(
            "Releasing simulation GPU resources after {} generations",
            self.generation()
        );
    }
}

/// Converts normalized RGBA to a wgpu clear colour
pub fn to_wgpu_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        let color = to_wgpu_color([1.0, 0.5, 0.0, 0.25]);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.5);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 0.25);
    }
}
