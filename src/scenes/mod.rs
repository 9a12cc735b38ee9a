//! Ready-made scenes, one per demo binary.
//!
//! Each module builds a [`crate::scene::Scene`] with fixed content and, where
//! the demo animates, an [`crate::driver::Animate`] implementation alongside
//! the node handles it drives. The builders are plain CPU-side code and need
//! no GPU, so their output is also exercised directly by the test suite.

pub mod custom_geometry;
pub mod materials;
pub mod shadows;
pub mod solar_system;
pub mod spinning_cube;
pub mod spotlight;
pub mod tube;

use cgmath::{Deg, Point3};

use crate::camera::{Camera, Projection};

/// The tutorial camera every scene starts from: 75 degree vertical fov,
/// near 0.1, far 100. The real aspect arrives with the first resize.
fn default_camera(eye: Point3<f32>) -> Camera {
    Camera::looking_at(
        eye,
        Point3::new(0.0, 0.0, 0.0),
        Projection::new(800, 600, Deg(75.0), 0.1, 100.0),
    )
}
