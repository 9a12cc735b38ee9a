//! Local/world transformations for scene nodes.
//!
//! A [`Transform`] stores position, rotation (as quaternion) and scale.
//! Composition with `*` follows the usual parent-then-child order, so a
//! node's world transform is `parent_world * local`. The packed
//! [`TransformRaw`] form is what actually lands in the per-draw GPU buffer.

use std::ops::Mul;

use cgmath::{One, SquareMatrix};

use crate::scene::mesh::VertexLayout;

/// Position, rotation and scale of a scene node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Transform {
    /// Identity transform (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity quaternion (no rotation)
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Identity transform moved to `position`.
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: cgmath::Vector3::new(x, y, z),
            ..Self::new()
        }
    }

    /// Replace the rotation with one built from intrinsic XYZ Euler angles.
    pub fn set_euler(
        &mut self,
        x: impl Into<cgmath::Rad<f32>>,
        y: impl Into<cgmath::Rad<f32>>,
        z: impl Into<cgmath::Rad<f32>>,
    ) {
        self.rotation = cgmath::Quaternion::from(cgmath::Euler::new(x.into(), y.into(), z.into()));
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = cgmath::Vector3::new(scale, scale, scale);
        self
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn to_raw(&self) -> TransformRaw {
        let model = self.to_matrix();
        let handedness = model.determinant().signum();
        TransformRaw {
            model: model.into(),
            normal: cgmath::Matrix3::from(self.rotation).into(),
            handedness,
        }
    }
}

impl Mul<Transform> for Transform {
    type Output = Self;

    fn mul(self, rhs: Transform) -> Self::Output {
        &self * &rhs
    }
}

impl<'a, 'b> Mul<&'b Transform> for &'a Transform {
    type Output = Transform;

    fn mul(self, rhs: &'b Transform) -> Self::Output {
        let new_rotation = self.rotation * rhs.rotation;

        let new_scale = cgmath::Vector3::new(
            self.scale.x * rhs.scale.x,
            self.scale.y * rhs.scale.y,
            self.scale.z * rhs.scale.z,
        );
        let scaled_rhs_pos = cgmath::Vector3::new(
            self.scale.x * rhs.position.x,
            self.scale.y * rhs.position.y,
            self.scale.z * rhs.position.z,
        );
        let new_position = self.position + (self.rotation * scaled_rhs_pos);

        Transform {
            position: new_position,
            rotation: new_rotation,
            scale: new_scale,
        }
    }
}

impl From<cgmath::Vector3<f32>> for Transform {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw transform is the actual data stored on the GPU.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformRaw {
    model: [[f32; 4]; 4],
    normal: [[f32; 3]; 3],
    handedness: f32,
}

/**
 * As we store transform data directly in GPU memory we need to tell what the bytes refer to:
 *
 * Stride layout here: 4x4 model matrix as four vec4 slots, followed by the 3x3
 * normal matrix as three vec3 slots and the handedness sign.
 */
impl VertexLayout for TransformRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<TransformRaw>() as wgpu::BufferAddress,
            // The shader only advances to the next element per draw instance,
            // not per vertex.
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // A mat4 takes up 4 vertex slots as it is technically 4 vec4s.
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 19]>() as wgpu::BufferAddress,
                    shader_location: 10,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 22]>() as wgpu::BufferAddress,
                    shader_location: 11,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 25]>() as wgpu::BufferAddress,
                    shader_location: 12,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Deg, Rotation3, Vector3};

    #[test]
    fn identity_composition_is_identity() {
        let a = Transform::new();
        let b = Transform::at(1.0, 2.0, 3.0);
        let composed = a * b;
        assert_relative_eq!(composed.position.x, 1.0);
        assert_relative_eq!(composed.position.y, 2.0);
        assert_relative_eq!(composed.position.z, 3.0);
    }

    #[test]
    fn parent_rotation_moves_child_offset() {
        // A child sitting at +x under a parent rotated 90 degrees around y
        // ends up on the -z axis.
        let mut parent = Transform::new();
        parent.rotation = cgmath::Quaternion::from_angle_y(Deg(90.0));
        let child = Transform::at(1.0, 0.0, 0.0);

        let world = &parent * &child;
        assert_relative_eq!(world.position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(world.position.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(world.position.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn parent_scale_applies_to_child_position_and_scale() {
        let parent = Transform::new().with_uniform_scale(2.0);
        let mut child = Transform::at(1.0, 0.0, 0.0);
        child.scale = Vector3::new(0.5, 0.5, 0.5);

        let world = &parent * &child;
        assert_relative_eq!(world.position.x, 2.0);
        assert_relative_eq!(world.scale.x, 1.0);
        assert_relative_eq!(world.scale.y, 1.0);
    }

    #[test]
    fn set_euler_matches_quaternion_from_euler() {
        let mut t = Transform::new();
        t.set_euler(cgmath::Rad(1.0), cgmath::Rad(1.0), cgmath::Rad(0.0));
        let expected = cgmath::Quaternion::from(cgmath::Euler::new(
            cgmath::Rad(1.0),
            cgmath::Rad(1.0),
            cgmath::Rad(0.0),
        ));
        assert_eq!(t.rotation, expected);
    }
}
