//! CPU-side mesh data: vertex formats and geometry containers.
//!
//! Geometry lives on the CPU as plain vectors until the renderer uploads it.
//! That keeps scene construction free of any GPU handles and lets the scene
//! builders run in plain unit tests.

/// Anything with a wgpu vertex buffer layout.
pub trait VertexLayout {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Vertex format for lit triangle meshes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl VertexLayout for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Vertex format for unlit line lists (wireframes, helpers).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl VertexLayout for LineVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// An indexed triangle mesh.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Build a geometry from separate attribute arrays.
    ///
    /// Attribute arrays are zipped, so the vertex count is the shortest of
    /// the three. Pass `None` for colors to default every vertex to white.
    pub fn from_attributes(
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        colors: Option<&[[f32; 3]]>,
        indices: &[u32],
    ) -> Self {
        let white = [1.0, 1.0, 1.0];
        let vertices = positions
            .iter()
            .zip(normals.iter())
            .enumerate()
            .map(|(i, (&position, &normal))| MeshVertex {
                position,
                normal,
                color: colors.and_then(|c| c.get(i).copied()).unwrap_or(white),
            })
            .collect();
        Self {
            vertices,
            indices: indices.to_vec(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A list of line segments, two vertices per segment.
#[derive(Clone, Debug, Default)]
pub struct LineGeometry {
    pub vertices: Vec<LineVertex>,
}

impl LineGeometry {
    pub fn new(vertices: Vec<LineVertex>) -> Self {
        Self { vertices }
    }

    pub fn push_segment(&mut self, from: [f32; 3], to: [f32; 3], color: [f32; 3]) {
        self.vertices.push(LineVertex {
            position: from,
            color,
        });
        self.vertices.push(LineVertex {
            position: to,
            color,
        });
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_attributes_zips_to_shortest() {
        let positions = [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = [[0.0, 0.0, 1.0]; 2];
        let geometry = Geometry::from_attributes(&positions, &normals, None, &[0, 1, 2]);
        assert_eq!(geometry.vertices.len(), 2);
        assert_eq!(geometry.vertices[0].color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn segments_come_in_pairs() {
        let mut lines = LineGeometry::default();
        lines.push_segment([0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        assert_eq!(lines.segment_count(), 1);
        assert_eq!(lines.vertices.len(), 2);
    }
}
