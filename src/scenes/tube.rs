//! A tube swept along a quadratic Bezier arc with a wireframe overlay.

use cgmath::Point3;

use crate::{
    geometry,
    lighting::Light,
    scene::{Material, NodeId, Scene, rgb},
};

pub struct Tube {
    pub scene: Scene,
    pub group: NodeId,
}

pub fn build() -> Tube {
    let mut scene = Scene::new(super::default_camera(Point3::new(0.0, 0.0, 15.0)));
    scene
        .lights
        .push(Light::directional([1.0, 1.0, 1.0], 1.0, Point3::new(-1.0, 2.0, 4.0)));

    let control = [
        Point3::new(-1.0, -1.0, 0.0),
        Point3::new(-1.0, 1.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    ];
    let tube_geometry = geometry::bezier_tube(control, 64, 1.0, 8);
    let edges = geometry::wireframe(&tube_geometry, rgb(0xffff00));

    // solid and wireframe share a group so they transform together
    let group = scene.add_node(None);
    scene.add_mesh(Some(group), tube_geometry, Material::shiny(rgb(0x515151)));
    scene.add_lines(Some(group), edges);

    Tube { scene, group }
}
