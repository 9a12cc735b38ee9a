use cgmath::{Quaternion, Rad, Rotation3, Vector3};
use vignette::scenes::solar_system;

#[test]
fn solar_system_orbits_chain_their_translations() {
    let mut demo = solar_system::build();
    demo.scene.update_world_transforms();

    let earth_orbit = demo.scene.world_transform(demo.earth_orbit);
    assert_eq!(earth_orbit.position, Vector3::new(10.0, 0.0, 0.0));

    // moon orbit sits 2 past the earth orbit, so 12 from the root
    let moon_orbit = demo.scene.world_transform(demo.moon_orbit);
    assert_eq!(moon_orbit.position, Vector3::new(12.0, 0.0, 0.0));

    // propagation never touches the locals
    assert_eq!(
        demo.scene.transform(demo.earth_orbit).position,
        Vector3::new(10.0, 0.0, 0.0)
    );
    assert_eq!(
        demo.scene.transform(demo.moon_orbit).position,
        Vector3::new(2.0, 0.0, 0.0)
    );
}

#[test]
fn rotating_the_root_swings_every_descendant() {
    let mut demo = solar_system::build();
    demo.scene.transform_mut(demo.root).rotation =
        Quaternion::from_angle_y(Rad(std::f32::consts::FRAC_PI_2));
    demo.scene.update_world_transforms();

    // a quarter turn about y sends +x to -z
    let earth_orbit = demo.scene.world_transform(demo.earth_orbit);
    assert!(earth_orbit.position.x.abs() < 1e-4);
    assert!((earth_orbit.position.z + 10.0).abs() < 1e-4);

    let moon_orbit = demo.scene.world_transform(demo.moon_orbit);
    assert!((moon_orbit.position.z + 12.0).abs() < 1e-4);
}

#[test]
fn mesh_scales_stay_local_to_their_node() {
    let mut demo = solar_system::build();
    demo.scene.update_world_transforms();

    assert_eq!(
        demo.scene.world_transform(demo.sun).scale,
        Vector3::new(3.0, 3.0, 3.0)
    );
    // the sun's scale must not leak into its siblings
    assert_eq!(
        demo.scene.world_transform(demo.earth).scale,
        Vector3::new(1.0, 1.0, 1.0)
    );
    assert_eq!(
        demo.scene.world_transform(demo.moon).scale,
        Vector3::new(0.5, 0.5, 0.5)
    );
}
