//! # Fullscreen Quad
//!
//! Two triangles covering the whole viewport in normalized device
//! coordinates. Created once and shared by the update and display passes.

use wgpu::util::DeviceExt;

/// A 2D vertex in normalized device coordinates.
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2D {
    /// Position [x, y] in clip space
    pub position: [f32; 2],
}

impl Vertex2D {
    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x2) at shader location 0
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex2D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }
}

/// Quad corners as a triangle list
pub const QUAD_VERTICES: [Vertex2D; 6] = [
    Vertex2D { position: [-1.0, -1.0] },
    Vertex2D { position: [1.0, -1.0] },
    Vertex2D { position: [-1.0, 1.0] },
    Vertex2D { position: [1.0, 1.0] },
    Vertex2D { position: [1.0, -1.0] },
    Vertex2D { position: [-1.0, 1.0] },
];

/// Immutable vertex buffer holding [`QUAD_VERTICES`]
pub struct FullscreenQuad {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl FullscreenQuad {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Fullscreen Quad"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            vertex_count: QUAD_VERTICES.len() as u32,
        }
    }

    /// Binds the quad and issues the draw call
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_clip_space() {
        let area: f32 = QUAD_VERTICES
            .chunks(3)
            .map(|tri| {
                let [a, b, c] = [tri[0].position, tri[1].position, tri[2].position];
                ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() / 2.0
            })
            .sum();
        assert_eq!(area, 4.0);
        assert_eq!(std::mem::size_of::<Vertex2D>() as u64, Vertex2D::desc().array_stride);
    }
}
