//! The spotlight furniture under a shadow-casting light, with a torus knot
//! as the centerpiece.

use cgmath::{Deg, Point3, Vector3};

use crate::{
    geometry,
    lighting::Light,
    scene::{Material, NodeId, Scene, rgb},
    scenes::spotlight::{self, Sweep},
};

pub struct Shadows {
    pub scene: Scene,
    pub knot: NodeId,
    pub sphere_pivot: NodeId,
    pub sphere: NodeId,
    pub animator: Sweep,
}

pub fn build() -> Shadows {
    let mut scene = Scene::new(super::default_camera(Point3::new(7.0, 7.0, 0.0)));
    scene
        .lights
        .push(Light::directional([1.0, 1.0, 1.0], 0.5, Point3::new(0.0, 5.0, 0.0)));
    scene.lights.push(
        Light::spot(
            [1.0, 1.0, 1.0],
            1.0,
            Point3::new(0.0, 5.0, 0.0),
            Deg(30.0),
            0.0,
        )
        .with_shadows(),
    );

    let furniture = spotlight::populate(&mut scene);

    let knot = scene.add_mesh(
        None,
        geometry::torus_knot(1.0, 0.3, 128, 64, 2, 3),
        Material::standard(rgb(0xffffff), 0.1, 0.2),
    );
    scene.transform_mut(knot).position = Vector3::new(0.0, 1.6, 0.0);

    scene.set_receive_shadow(furniture.ground, true);
    scene.set_cast_shadow(knot, true);
    scene.set_receive_shadow(knot, true);
    for torus in &furniture.toruses {
        scene.set_cast_shadow(*torus, true);
        scene.set_receive_shadow(*torus, true);
    }
    scene.set_cast_shadow(furniture.sphere, true);
    scene.set_receive_shadow(furniture.sphere, true);

    Shadows {
        scene,
        knot,
        sphere_pivot: furniture.sphere_pivot,
        sphere: furniture.sphere,
        animator: Sweep::new(furniture.sphere_pivot, furniture.sphere),
    }
}
