//! Fullscreen kernel pipelines
//!
//! A kernel is a vertex + fragment shader pair drawn over the fullscreen quad.
//! Every kernel in this crate reads the same three resources, declared once as
//! [`KernelBinding`] and resolved to a bind group layout when the pipeline is
//! built, so nothing is looked up by name at draw time.

use wgpu::*;

use super::vertex::Vertex2D;
use crate::error::{LifeError, LifeResult};
use crate::gfx::resources::TextureResource;
use crate::wgpu_utils::{self, validation_scope};

/// Resources bound to group 0 of every kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelBinding {
    /// `texture_2d<f32>` holding the current state
    StateTexture,
    /// Repeat/nearest sampler for the state texture
    StateSampler,
    /// Per-kernel uniform block
    Params,
}

impl KernelBinding {
    /// All bindings in slot order
    pub const ALL: [KernelBinding; 3] = [
        KernelBinding::StateTexture,
        KernelBinding::StateSampler,
        KernelBinding::Params,
    ];

    /// Binding slot inside group 0
    pub fn slot(&self) -> u32 {
        match self {
            KernelBinding::StateTexture => 0,
            KernelBinding::StateSampler => 1,
            KernelBinding::Params => 2,
        }
    }

    fn binding_type(&self) -> BindingType {
        match self {
            KernelBinding::StateTexture => wgpu_utils::texture_2d(),
            KernelBinding::StateSampler => wgpu_utils::sampler(SamplerBindingType::Filtering),
            KernelBinding::Params => wgpu_utils::uniform(),
        }
    }

    fn layout_entry(&self) -> BindGroupLayoutEntry {
        BindGroupLayoutEntry {
            binding: self.slot(),
            visibility: ShaderStages::FRAGMENT,
            ty: self.binding_type(),
            count: None,
        }
    }
}

/// Configuration for creating a kernel pipeline
#[derive(Debug, Clone)]
pub struct KernelConfig {
    pub label: String,
    pub source: String,
    pub target_format: TextureFormat,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            label: "Kernel".to_string(),
            source: String::new(),
            target_format: TextureResource::STATE_FORMAT,
        }
    }
}

impl KernelConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    /// Sets the WGSL source (builder pattern)
    ///
    /// The source must define `vs_main` and `fs_main`.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_owned();
        self
    }

    /// Sets the colour target format the kernel writes (builder pattern)
    pub fn with_target_format(mut self, format: TextureFormat) -> Self {
        self.target_format = format;
        self
    }
}

/// Compiled kernel: pipeline plus the bind group layout it expects
pub struct KernelPipeline {
    label: String,
    pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
}

impl KernelPipeline {
    /// Compiles and links a kernel.
    ///
    /// # Errors
    /// [`LifeError::ShaderCompilation`] carrying the compiler diagnostics if
    /// the source fails to compile or the pipeline fails validation.
    pub fn build(device: &Device, config: &KernelConfig) -> LifeResult<Self> {
        let (module, error) = validation_scope(device, || {
            device.create_shader_module(ShaderModuleDescriptor {
                label: Some(&config.label),
                source: ShaderSource::Wgsl(config.source.as_str().into()),
            })
        });

        let info = pollster::block_on(module.get_compilation_info());
        let diagnostics: Vec<String> = info
            .messages
            .iter()
            .filter(|m| matches!(m.message_type, CompilationMessageType::Error))
            .map(|m| match &m.location {
                Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
                None => m.message.clone(),
            })
            .collect();

        if !diagnostics.is_empty() {
            return Err(LifeError::shader(&config.label, diagnostics.join("\n")));
        }
        if let Some(error) = error {
            return Err(LifeError::shader(&config.label, error.to_string()));
        }

        let entries = KernelBinding::ALL.map(|binding| binding.layout_entry());
        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some(&format!("{} Layout", config.label)),
            entries: &entries,
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", config.label)),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let (pipeline, error) = validation_scope(device, || {
            device.create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: &module,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex2D::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: &module,
                    entry_point: Some("fs_main"),
                    // Opaque writes: no blending into the previous contents
                    targets: &[Some(ColorTargetState {
                        format: config.target_format,
                        blend: None,
                        write_mask: ColorWrites::ALL,
                    })],
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        });
        if let Some(error) = error {
            return Err(LifeError::shader(&config.label, error.to_string()));
        }

        log::debug!("Built kernel pipeline '{}'", config.label);

        Ok(Self {
            label: config.label.clone(),
            pipeline,
            bind_group_layout,
        })
    }

    /// Binds a state texture and a params buffer for this kernel
    pub fn bind_state(
        &self,
        device: &Device,
        state: &TextureResource,
        params: BindingResource,
    ) -> BindGroup {
        let mut params = Some(params);
        let entries: Vec<BindGroupEntry> = KernelBinding::ALL
            .iter()
            .filter_map(|binding| {
                let resource = match binding {
                    KernelBinding::StateTexture => BindingResource::TextureView(&state.view),
                    KernelBinding::StateSampler => BindingResource::Sampler(&state.sampler),
                    KernelBinding::Params => params.take()?,
                };
                Some(BindGroupEntry {
                    binding: binding.slot(),
                    resource,
                })
            })
            .collect();

        device.create_bind_group(&BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", self.label)),
            layout: &self.bind_group_layout,
            entries: &entries,
        })
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
