//! Sun, earth and moon arranged as nested orbit nodes.
//!
//! All three bodies share one low-poly sphere; the hierarchy is
//! root -> earth orbit (x = 10) -> moon orbit (x = 2), so rotating an orbit
//! node swings everything beneath it.

use cgmath::{Point3, Rad, Vector3};
use instant::Duration;

use crate::{
    driver::Animate,
    geometry,
    lighting::Light,
    scene::{Material, NodeId, Scene, rgb},
};

pub struct SolarSystem {
    pub scene: Scene,
    pub root: NodeId,
    pub earth_orbit: NodeId,
    pub moon_orbit: NodeId,
    pub sun: NodeId,
    pub earth: NodeId,
    pub moon: NodeId,
    pub animator: Orbits,
}

pub fn build() -> SolarSystem {
    let mut scene = Scene::new(super::default_camera(Point3::new(0.0, 0.0, 20.0)));
    scene
        .lights
        .push(Light::directional([1.0, 1.0, 1.0], 1.0, Point3::new(-1.0, 2.0, 4.0)));

    let sphere = geometry::sphere(1.0, 12, 12);

    let root = scene.add_node(None);

    let sun = scene.add_mesh(
        Some(root),
        sphere.clone(),
        Material::shiny(rgb(0xffffff))
            .with_emissive(rgb(0xffff00))
            .with_flat_shading(),
    );
    scene.transform_mut(sun).scale = Vector3::new(3.0, 3.0, 3.0);

    let earth_orbit = scene.add_node(Some(root));
    scene.transform_mut(earth_orbit).position = Vector3::new(10.0, 0.0, 0.0);

    let earth = scene.add_mesh(
        Some(earth_orbit),
        sphere.clone(),
        Material::shiny(rgb(0x2233ff))
            .with_emissive(rgb(0x112244))
            .with_flat_shading(),
    );

    let moon_orbit = scene.add_node(Some(earth_orbit));
    scene.transform_mut(moon_orbit).position = Vector3::new(2.0, 0.0, 0.0);

    let moon = scene.add_mesh(
        Some(moon_orbit),
        sphere,
        Material::shiny(rgb(0x888888))
            .with_emissive(rgb(0x222222))
            .with_flat_shading(),
    );
    scene.transform_mut(moon).scale = Vector3::new(0.5, 0.5, 0.5);

    SolarSystem {
        scene,
        root,
        earth_orbit,
        moon_orbit,
        sun,
        earth,
        moon,
        animator: Orbits {
            root,
            earth_orbit,
            moon_orbit,
        },
    }
}

/// Spins the three orbit nodes at their own rates: the root at half the
/// elapsed seconds, the earth orbit at twice, the moon orbit at five times.
pub struct Orbits {
    root: NodeId,
    earth_orbit: NodeId,
    moon_orbit: NodeId,
}

impl Animate for Orbits {
    fn update(&mut self, scene: &mut Scene, elapsed: Duration) {
        let secs = elapsed.as_secs_f32();
        scene
            .transform_mut(self.root)
            .set_euler(Rad(0.0), Rad(secs / 2.0), Rad(0.0));
        scene
            .transform_mut(self.earth_orbit)
            .set_euler(Rad(0.0), Rad(secs * 2.0), Rad(0.0));
        scene
            .transform_mut(self.moon_orbit)
            .set_euler(Rad(0.0), Rad(secs * 5.0), Rad(0.0));
    }
}
