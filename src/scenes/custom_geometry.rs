//! A quad built from raw vertex attributes, with a normal helper overlay.
//!
//! The four corners carry red, green, blue and yellow vertex colors; the
//! helper draws one short yellow segment along each vertex normal.

use cgmath::Point3;

use crate::{
    geometry,
    lighting::Light,
    scene::{Geometry, Material, NodeId, Scene, rgb},
};

pub struct CustomGeometry {
    pub scene: Scene,
    pub quad: NodeId,
}

pub fn build() -> CustomGeometry {
    let mut scene = Scene::new(super::default_camera(Point3::new(0.0, 0.0, 2.0)));
    scene
        .lights
        .push(Light::directional([1.0, 1.0, 1.0], 1.0, Point3::new(-1.0, 2.0, 4.0)));

    let positions = [
        [-1.0, -1.0, 0.0],
        [1.0, -1.0, 0.0],
        [-1.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ];
    let normals = [[0.0, 0.0, 1.0]; 4];
    let colors = [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
    ];
    let indices = [0, 1, 2, 2, 1, 3];
    let quad_geometry = Geometry::from_attributes(&positions, &normals, Some(&colors), &indices);

    let normal_helper = geometry::vertex_normals(&quad_geometry, 0.1, rgb(0xffff00));

    let quad = scene.add_mesh(
        None,
        quad_geometry,
        Material::shiny(rgb(0xffffff)).with_vertex_colors(),
    );
    // child of the quad so the helper follows its transform
    scene.add_lines(Some(quad), normal_helper);

    CustomGeometry { scene, quad }
}
