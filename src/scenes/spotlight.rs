//! A spotlight playground: a ground plane, a half sphere, a ring of toruses
//! and a small sphere circling the scene while the spotlight tracks it.

use std::f32::consts::PI;

use cgmath::{Deg, EuclideanSpace, Point3, Rad};
use instant::Duration;

use crate::{
    driver::Animate,
    geometry,
    lighting::{Light, LightKind},
    scene::{Material, NodeId, Scene, rgb},
};

pub struct Spotlight {
    pub scene: Scene,
    pub sphere_pivot: NodeId,
    pub sphere: NodeId,
    pub animator: Sweep,
}

pub fn build() -> Spotlight {
    let mut scene = Scene::new(super::default_camera(Point3::new(7.0, 7.0, 0.0)));
    scene.lights.push(Light::spot(
        [1.0, 1.0, 1.0],
        1.0,
        Point3::new(0.0, 5.0, 0.0),
        Deg(40.0),
        1.0,
    ));

    let furniture = populate(&mut scene);

    let half_sphere = scene.add_mesh(
        None,
        geometry::sphere_sweep(1.5, 64, 64, Rad(0.0), Rad(PI)),
        Material::standard(rgb(0xffffff), 0.1, 0.2),
    );
    scene
        .transform_mut(half_sphere)
        .set_euler(Deg(-90.0), Deg(0.0), Deg(0.0));

    Spotlight {
        scene,
        sphere_pivot: furniture.sphere_pivot,
        sphere: furniture.sphere,
        animator: Sweep::new(furniture.sphere_pivot, furniture.sphere),
    }
}

/// Handles to the furniture shared by the spotlight and shadow scenes.
pub(super) struct Furniture {
    pub ground: NodeId,
    pub toruses: Vec<NodeId>,
    pub sphere_pivot: NodeId,
    pub sphere: NodeId,
}

/// Builds the shared furniture: a ground plane, eight toruses on rotated
/// pivots and the small sphere on its own pivot. The centerpiece differs
/// between the two scenes, so callers add their own.
pub(super) fn populate(scene: &mut Scene) -> Furniture {
    let ground = scene.add_mesh(
        None,
        geometry::plane(10.0, 10.0),
        Material::standard(rgb(0x2c3e50), 0.5, 0.5).with_double_sided(),
    );
    scene
        .transform_mut(ground)
        .set_euler(Deg(-90.0), Deg(0.0), Deg(0.0));

    let mut toruses = Vec::with_capacity(8);
    for i in 0..8 {
        let pivot = scene.add_node(None);
        scene
            .transform_mut(pivot)
            .set_euler(Deg(0.0), Deg(45.0 * i as f32), Deg(0.0));
        let torus = scene.add_mesh(
            Some(pivot),
            geometry::torus(0.4, 0.1, 32, 32),
            Material::standard(rgb(0x9b59b6), 0.5, 0.9),
        );
        scene.transform_mut(torus).position = cgmath::Vector3::new(3.0, 0.5, 0.0);
        toruses.push(torus);
    }

    let sphere_pivot = scene.add_node(None);
    let sphere = scene.add_mesh(
        Some(sphere_pivot),
        geometry::sphere(0.3, 32, 32),
        Material::standard(rgb(0xe74c3c), 0.2, 0.5),
    );
    scene.transform_mut(sphere).position = cgmath::Vector3::new(3.0, 0.5, 0.0);

    Furniture {
        ground,
        toruses,
        sphere_pivot,
        sphere,
    }
}

/// Rotates the small-sphere pivot at 50 degrees per second and aims the
/// first spot light at the sphere's current world position.
pub struct Sweep {
    pivot: NodeId,
    sphere: NodeId,
}

impl Sweep {
    pub(super) fn new(pivot: NodeId, sphere: NodeId) -> Self {
        Self { pivot, sphere }
    }
}

impl Animate for Sweep {
    fn update(&mut self, scene: &mut Scene, elapsed: Duration) {
        let secs = elapsed.as_secs_f32();
        scene
            .transform_mut(self.pivot)
            .set_euler(Deg(0.0), Deg(secs * 50.0), Deg(0.0));

        // the light needs the post-rotation world position
        scene.update_world_transforms();
        let target = Point3::from_vec(scene.world_transform(self.sphere).position);
        if let Some(light) = scene
            .lights
            .iter_mut()
            .find(|light| matches!(light.kind, LightKind::Spot { .. }))
        {
            light.target = target;
        }
    }
}
