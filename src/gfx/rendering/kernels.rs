//! Update and display kernels
//!
//! Each kernel owns its WGSL source, its compiled pipeline, its typed uniform
//! block and one bind group per state texture, so switching the input texture
//! after a ping-pong swap is just choosing the other bind group.

use super::kernel_pipeline::{KernelConfig, KernelPipeline};
use super::ping_pong::PingPongTargets;
use crate::error::LifeResult;
use crate::wgpu_utils::UniformBuffer;

/// A shader pass drawn over the fullscreen quad with one state texture bound
pub trait FullscreenKernel {
    /// Debug name used for pass labels
    fn name(&self) -> &str;

    fn pipeline(&self) -> &wgpu::RenderPipeline;

    /// Bind group reading state texture `state_index` of the ping-pong pair
    fn state_bind_group(&self, state_index: usize) -> &wgpu::BindGroup;

    /// Records the kernel into an open render pass
    fn record(&self, render_pass: &mut wgpu::RenderPass<'_>, state_index: usize) {
        render_pass.set_pipeline(self.pipeline());
        render_pass.set_bind_group(0, self.state_bind_group(state_index), &[]);
    }
}

/// Uniform block of the update kernel
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UpdateParams {
    /// Grid size in cells, converts pixel to texture coordinates
    pub scale: [f32; 2],
    pub _padding: [f32; 2],
}

impl UpdateParams {
    pub fn new(sim_width: u32, sim_height: u32) -> Self {
        Self {
            scale: [sim_width as f32, sim_height as f32],
            _padding: [0.0; 2],
        }
    }
}

/// Uniform block of the display kernel
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DisplayParams {
    /// Viewport size in pixels
    pub scale: [f32; 2],
    pub _padding: [f32; 2],
    pub alive: [f32; 4],
    pub dead: [f32; 4],
}

impl DisplayParams {
    pub fn new(width: u32, height: u32, alive: [f32; 4], dead: [f32; 4]) -> Self {
        Self {
            scale: [width as f32, height as f32],
            _padding: [0.0; 2],
            alive,
            dead,
        }
    }
}

/// Computes one generation from the front state into the bound target
pub struct UpdateKernel {
    pipeline: KernelPipeline,
    params: UniformBuffer<UpdateParams>,
    bind_groups: [wgpu::BindGroup; 2],
}

impl UpdateKernel {
    pub const SOURCE: &'static str = include_str!("shaders/update.wgsl");

    pub fn new(device: &wgpu::Device, targets: &PingPongTargets) -> LifeResult<Self> {
        let config = KernelConfig::default()
            .with_label("Update")
            .with_source(Self::SOURCE)
            .with_target_format(PingPongTargets::FORMAT);
        let pipeline = KernelPipeline::build(device, &config)?;

        let (width, height) = targets.size();
        let params = UniformBuffer::new_with_data(device, &UpdateParams::new(width, height));
        let bind_groups = std::array::from_fn(|i| {
            pipeline.bind_state(device, targets.state(i), params.binding_resource())
        });

        Ok(Self {
            pipeline,
            params,
            bind_groups,
        })
    }

    pub fn params(&self) -> UpdateParams {
        self.params.content()
    }
}

impl FullscreenKernel for UpdateKernel {
    fn name(&self) -> &str {
        self.pipeline.label()
    }

    fn pipeline(&self) -> &wgpu::RenderPipeline {
        self.pipeline.pipeline()
    }

    fn state_bind_group(&self, state_index: usize) -> &wgpu::BindGroup {
        &self.bind_groups[state_index]
    }
}

/// Maps the front state to display colours at the surface resolution
pub struct DisplayKernel {
    pipeline: KernelPipeline,
    params: UniformBuffer<DisplayParams>,
    bind_groups: [wgpu::BindGroup; 2],
}

impl DisplayKernel {
    pub const SOURCE: &'static str = include_str!("shaders/display.wgsl");

    pub fn new(
        device: &wgpu::Device,
        targets: &PingPongTargets,
        surface_format: wgpu::TextureFormat,
        params: DisplayParams,
    ) -> LifeResult<Self> {
        let config = KernelConfig::default()
            .with_label("Display")
            .with_source(Self::SOURCE)
            .with_target_format(surface_format);
        let pipeline = KernelPipeline::build(device, &config)?;

        let params = UniformBuffer::new_with_data(device, &params);
        let bind_groups = std::array::from_fn(|i| {
            pipeline.bind_state(device, targets.state(i), params.binding_resource())
        });

        Ok(Self {
            pipeline,
            params,
            bind_groups,
        })
    }

    /// Updates the viewport scale after the surface changed size
    pub fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        let current = self.params.content();
        self.params.update_content(
            queue,
            DisplayParams::new(width, height, current.alive, current.dead),
        );
    }

    pub fn params(&self) -> DisplayParams {
        self.params.content()
    }
}

impl FullscreenKernel for DisplayKernel {
    fn name(&self) -> &str {
        self.pipeline.label()
    }

    fn pipeline(&self) -> &wgpu::RenderPipeline {
        self.pipeline.pipeline()
    }

    fn state_bind_group(&self, state_index: usize) -> &wgpu::BindGroup {
        &self.bind_groups[state_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layouts_match_wgsl() {
        // vec2 + vec2 padding
        assert_eq!(std::mem::size_of::<UpdateParams>(), 16);
        // vec2 + padding, then two vec4 at 16-byte offsets
        assert_eq!(std::mem::size_of::<DisplayParams>(), 48);
    }

    #[test]
    fn test_params_scale() {
        assert_eq!(UpdateParams::new(800, 600).scale, [800.0, 600.0]);
        let display = DisplayParams::new(4, 2, [1.0; 4], [0.0; 4]);
        assert_eq!(display.scale, [4.0, 2.0]);
        assert_eq!(display.alive, [1.0; 4]);
    }

    #[test]
    fn test_kernel_sources_define_entry_points() {
        for source in [UpdateKernel::SOURCE, DisplayKernel::SOURCE] {
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
        }
        // The self cell is only sampled in the sum == 2 branch
        let self_sample = "cell_at(frag, vec2<f32>(0.0, 0.0))";
        assert_eq!(UpdateKernel::SOURCE.matches(self_sample).count(), 1);
        let branch = UpdateKernel::SOURCE.find("sum == 2").unwrap();
        assert!(UpdateKernel::SOURCE.find(self_sample).unwrap() > branch);
    }
}
