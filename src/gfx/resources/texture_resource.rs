//! Texture resource management for wgpu
//!
//! Provides the simulation state textures: RGBA8 render targets sampled with
//! repeat addressing (the grid is a torus) and nearest filtering (no
//! interpolated cell states), plus texture readback for diagnostics.

use crate::error::{LifeError, LifeResult};
use crate::wgpu_utils::validation_scope;

/// GPU texture resource containing texture, view, and sampler
///
/// Bundles the three main components needed for texture operations:
/// - Texture: The actual GPU memory allocation
/// - View: Interface for shader access and render pass attachment
/// - Sampler: Filtering and addressing configuration
#[derive(Clone)]
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    /// Pixel format of the simulation state
    pub const STATE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Creates a W×H state texture usable both as sampled input and as a
    /// render target.
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating resources
    /// * `width` - Grid width in cells (not window pixels)
    /// * `height` - Grid height in cells (not window pixels)
    /// * `label` - Debug label for the texture
    ///
    /// # Errors
    /// [`LifeError::RenderTarget`] if the device rejects the texture
    pub fn create_state_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
    ) -> LifeResult<Self> {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let (texture, error) = validation_scope(device, || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::STATE_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST
                    | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            })
        });
        if let Some(error) = error {
            return Err(LifeError::render_target(format!("{}: {}", label, error)));
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Repeat wraps neighbour lookups across the edges; Nearest keeps every
        // sample one of the two canonical colours.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// Uploads tightly packed RGBA8 data covering the whole texture
    pub fn upload_rgba(&self, queue: &wgpu::Queue, data: &[u8]) {
        let size = self.texture.size();
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.width),
                rows_per_image: Some(size.height),
            },
            size,
        );
    }

    pub fn width(&self) -> u32 {
        self.texture.width()
    }

    pub fn height(&self) -> u32 {
        self.texture.height()
    }
}

/// Row pitch for texture-to-buffer copies, padded to the copy alignment
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = 4 * width;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Reads an RGBA8 texture back to the CPU (blocking operation)
///
/// Returns tightly packed rows, first row first. The texture must have been
/// created with `COPY_SRC`.
pub fn read_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
) -> LifeResult<Vec<u8>> {
    let width = texture.width();
    let height = texture.height();
    let unpadded = (4 * width) as usize;
    let padded = padded_bytes_per_row(width);

    let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Texture Readback"),
        size: (padded * height) as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Readback Encoder"),
    });
    encoder.copy_texture_to_buffer(
        texture.as_image_copy(),
        wgpu::TexelCopyBufferInfo {
            buffer: &staging_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        texture.size(),
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging_buffer.slice(..);
    let (tx, rx) = futures::channel::oneshot::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    let _ = device.poll(wgpu::MaintainBase::Wait);

    match futures::executor::block_on(rx) {
        Ok(Ok(())) => {
            let mapped = slice.get_mapped_range();
            let mut pixels = Vec::with_capacity(unpadded * height as usize);
            for row in mapped.chunks(padded as usize) {
                pixels.extend_from_slice(&row[..unpadded]);
            }
            drop(mapped);
            staging_buffer.unmap();
            Ok(pixels)
        }
        Ok(Err(e)) => Err(LifeError::readback(e.to_string())),
        Err(_) => Err(LifeError::readback("map callback dropped before completion")),
    }
}
