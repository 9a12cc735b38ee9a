//! A unit cube under a single directional light, spinning about x and y.

use cgmath::{Point3, Rad};
use instant::Duration;

use crate::{
    driver::Animate,
    geometry,
    lighting::Light,
    scene::{Material, NodeId, Scene, rgb},
};

pub struct SpinningCube {
    pub scene: Scene,
    pub cube: NodeId,
    pub animator: Spin,
}

pub fn build() -> SpinningCube {
    let mut scene = Scene::new(super::default_camera(Point3::new(0.0, 0.0, 2.0)));
    scene
        .lights
        .push(Light::directional([1.0, 1.0, 1.0], 1.0, Point3::new(-1.0, 2.0, 4.0)));

    let cube = scene.add_mesh(
        None,
        geometry::cuboid(1.0, 1.0, 1.0),
        Material::shiny(rgb(0x044a88)),
    );

    SpinningCube {
        scene,
        cube,
        animator: Spin { cube },
    }
}

/// Sets the cube's x and y rotation to the elapsed time in seconds.
pub struct Spin {
    cube: NodeId,
}

impl Animate for Spin {
    fn update(&mut self, scene: &mut Scene, elapsed: Duration) {
        let secs = elapsed.as_secs_f32();
        scene
            .transform_mut(self.cube)
            .set_euler(Rad(secs), Rad(secs), Rad(0.0));
    }
}
