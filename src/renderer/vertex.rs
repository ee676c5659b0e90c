//! Vertex and uniform types for the logo quad

use bytemuck::{Pod, Zeroable};

/// 2D vertex with texture coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            tex_coords: [u, v],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Quad centred on the origin; the shader offsets it each frame.
/// Texture v runs downward, so the top edge samples v = 0.
pub const fn quad_vertices(half_extent: f32) -> [Vertex; 4] {
    let h = half_extent;
    [
        Vertex::new(h, h, 1.0, 0.0),   // top right
        Vertex::new(h, -h, 1.0, 1.0),  // bottom right
        Vertex::new(-h, -h, 0.0, 1.0), // bottom left
        Vertex::new(-h, h, 0.0, 0.0),  // top left
    ]
}

/// Two counter-clockwise triangles
pub const QUAD_INDICES: [u16; 6] = [0, 3, 1, 1, 3, 2];

/// Per-frame uniform (must match `Quad` in shader.wgsl)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadUniform {
    pub offset: [f32; 2],
    pub _pad: [f32; 2], // tint is 16-byte aligned in WGSL
    pub tint: [f32; 4],
}

impl QuadUniform {
    pub fn new(offset: glam::Vec2, tint: glam::Vec3) -> Self {
        Self {
            offset: offset.to_array(),
            _pad: [0.0; 2],
            tint: tint.extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HALF_EXTENT;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_quad_matches_half_extent() {
        for v in quad_vertices(HALF_EXTENT) {
            assert_eq!(v.position[0].abs(), HALF_EXTENT);
            assert_eq!(v.position[1].abs(), HALF_EXTENT);
        }
    }

    #[test]
    fn test_indices_cover_all_corners() {
        let mut seen = [false; 4];
        for i in QUAD_INDICES {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_triangles_wind_counter_clockwise() {
        let quad = quad_vertices(HALF_EXTENT);
        for tri in QUAD_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| quad[i as usize].position);
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross > 0.0);
        }
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<QuadUniform>(), 32);
        let u = QuadUniform::new(Vec2::new(0.5, -0.25), Vec3::new(1.0, 0.0, 0.5));
        assert_eq!(u.offset, [0.5, -0.25]);
        assert_eq!(u.tint, [1.0, 0.0, 0.5, 1.0]);
    }
}
