//! Ping-pong render targets
//!
//! Owns the two state textures and the fullscreen quad. One texture is the
//! front (newest generation, readable), the other the back (write target of
//! the next update pass). A swap only flips which index is front; no pixels
//! are copied.
//!
//! The "offscreen framebuffer" of a GL renderer corresponds here to a render
//! pass whose colour attachment is the back texture's view. Views are created
//! once with the textures and reused every generation.

use super::kernels::FullscreenKernel;
use super::vertex::FullscreenQuad;
use crate::error::{LifeError, LifeResult};
use crate::gfx::resources::{read_rgba, TextureResource};
use crate::simulation::grid::CellGrid;

/// Front/back state textures plus the shared quad
pub struct PingPongTargets {
    states: [TextureResource; 2],
    quad: FullscreenQuad,
    front: usize,
    generation: u64,
    width: u32,
    height: u32,
}

impl PingPongTargets {
    /// Format of both state textures
    pub const FORMAT: wgpu::TextureFormat = TextureResource::STATE_FORMAT;

    /// Creates both state textures for a W×H grid, both all-dead.
    ///
    /// Texture 0 starts as front.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> LifeResult<Self> {
        let states = [
            TextureResource::create_state_texture(device, width, height, "State Texture A")?,
            TextureResource::create_state_texture(device, width, height, "State Texture B")?,
        ];
        log::info!("Created {}x{} ping-pong state textures", width, height);

        Ok(Self {
            states,
            quad: FullscreenQuad::new(device),
            front: 0,
            generation: 0,
            width,
            height,
        })
    }

    /// Runs `kernel` with front as input and back as target, then swaps.
    ///
    /// After this returns, front is the texture just written.
    pub fn render_to_back<K: FullscreenKernel>(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        kernel: &K,
    ) {
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(kernel.name()),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.states[self.back_index()].view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Every texel is overwritten by the pass
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_viewport(0.0, 0.0, self.width as f32, self.height as f32, 0.0, 1.0);
            kernel.record(&mut render_pass, self.front);
            self.quad.draw(&mut render_pass);
        }

        self.swap();
    }

    /// Runs `kernel` with front as input into a visible target.
    ///
    /// The target is cleared to `clear_color` first, and the viewport spans
    /// `viewport` pixels (the window size, not the grid size).
    pub fn render_to_screen<K: FullscreenKernel>(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        viewport: (u32, u32),
        clear_color: wgpu::Color,
        kernel: &K,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(kernel.name()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_viewport(0.0, 0.0, viewport.0 as f32, viewport.1 as f32, 0.0, 1.0);
        kernel.record(&mut render_pass, self.front);
        self.quad.draw(&mut render_pass);
    }

    /// Writes `grid` into the front texture
    pub fn upload(&self, queue: &wgpu::Queue, grid: &CellGrid) -> LifeResult<()> {
        self.check_size(grid.width(), grid.height())?;
        self.states[self.front].upload_rgba(queue, &grid.to_rgba());
        Ok(())
    }

    /// Copies the front texture back into a [`CellGrid`] (blocking)
    pub fn read_front(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> LifeResult<CellGrid> {
        let pixels = read_rgba(device, queue, &self.states[self.front].texture)?;
        CellGrid::from_rgba(self.width, self.height, &pixels)
            .ok_or_else(|| LifeError::readback("readback size does not match the grid"))
    }

    /// State texture `index` (0 or 1), for binding as kernel input
    pub fn state(&self, index: usize) -> &TextureResource {
        &self.states[index]
    }

    /// Index of the texture holding the newest generation
    pub fn front_index(&self) -> usize {
        self.front
    }

    /// Number of swaps since creation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Grid size in cells
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn back_index(&self) -> usize {
        1 - self.front
    }

    fn swap(&mut self) {
        self.front = self.back_index();
        self.generation += 1;
    }

    fn check_size(&self, width: u32, height: u32) -> LifeResult<()> {
        if (width, height) != (self.width, self.height) {
            return Err(LifeError::GridSize {
                expected_width: self.width,
                expected_height: self.height,
                width,
                height,
            });
        }
        Ok(())
    }
}
