//! A box and a sphere sharing one red material, for side-by-side shading.

use cgmath::{Point3, Vector3};

use crate::{
    geometry,
    lighting::Light,
    scene::{Material, Scene, rgb},
};

pub fn build() -> Scene {
    let mut scene = Scene::new(super::default_camera(Point3::new(0.0, 0.0, 3.0)));
    scene
        .lights
        .push(Light::directional([1.0, 1.0, 1.0], 1.0, Point3::new(-1.0, 2.0, 4.0)));

    let material = Material::standard(rgb(0xff0000), 1.0, 0.0);

    let cube = scene.add_mesh(None, geometry::cuboid(1.0, 1.0, 1.0), material);
    scene.transform_mut(cube).position = Vector3::new(-1.0, 0.0, 0.0);

    let sphere = scene.add_mesh(None, geometry::sphere(0.7, 32, 32), material);
    scene.transform_mut(sphere).position = Vector3::new(1.0, 0.0, 0.0);

    scene
}
