//! Perspective camera and its GPU uniform.

use cgmath::{Matrix4, Point3, Rad, Vector3, perspective};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// A look-at camera with an embedded perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub projection: Projection,
}

impl Camera {
    pub fn looking_at(eye: Point3<f32>, target: Point3<f32>, projection: Projection) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
            projection,
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection.to_matrix() * self.view_matrix()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }
}

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(
        width: u32,
        height: u32,
        fovy: impl Into<Rad<f32>>,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        Self {
            aspect,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Track a viewport size change.
    ///
    /// A zero-height viewport (minimized window) keeps the previous aspect
    /// ratio rather than producing a NaN/infinite projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    // The camera's world position; w is unused but keeps 16 byte alignment.
    position: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_proj: Matrix4::identity().into(),
            position: [0.0; 4],
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection_matrix().into();
        self.position = [camera.eye.x, camera.eye.y, camera.eye.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Deg;

    #[test]
    fn resize_sets_exact_aspect() {
        let mut projection = Projection::new(800, 600, Deg(75.0), 0.1, 100.0);
        for (width, height) in [(1920u32, 1080u32), (100, 700), (640, 480), (1, 1)] {
            projection.resize(width, height);
            assert_eq!(projection.aspect(), width as f32 / height as f32);
        }
    }

    #[test]
    fn zero_height_resize_keeps_previous_aspect() {
        let mut projection = Projection::new(800, 600, Deg(75.0), 0.1, 100.0);
        let before = projection.aspect();
        projection.resize(800, 0);
        assert_eq!(projection.aspect(), before);
        assert!(projection.aspect().is_finite());
        // and the projection matrix stays well-formed
        let m = projection.to_matrix();
        assert!(m.x.x.is_finite());
    }

    #[test]
    fn zero_height_construction_falls_back_to_square() {
        let projection = Projection::new(800, 0, Deg(75.0), 0.1, 100.0);
        assert_eq!(projection.aspect(), 1.0);
    }

    #[test]
    fn uniform_tracks_eye_position() {
        let projection = Projection::new(800, 600, Deg(75.0), 0.1, 100.0);
        let camera = Camera::looking_at(
            Point3::new(7.0, 7.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            projection,
        );
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        assert_relative_eq!(uniform.position[0], 7.0);
        assert_relative_eq!(uniform.position[1], 7.0);
        assert_relative_eq!(uniform.position[2], 0.0);
    }
}
