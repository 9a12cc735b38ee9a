use std::time::Duration;

use approx::assert_relative_eq;
use cgmath::{Euler, Quaternion, Rad};
use vignette::driver::Animate;
use vignette::scenes::{solar_system, spinning_cube, spotlight};

#[test]
fn cube_rotation_tracks_elapsed_seconds() {
    let mut demo = spinning_cube::build();
    demo.animator
        .update(&mut demo.scene, Duration::from_millis(1000));

    let rotation = demo.scene.transform(demo.cube).rotation;
    let expected = Quaternion::from(Euler::new(Rad(1.0_f32), Rad(1.0), Rad(0.0)));
    assert_relative_eq!(rotation, expected, epsilon = 1e-6);
}

#[test]
fn animators_are_pure_in_the_elapsed_time() {
    let mut demo = solar_system::build();
    let elapsed = Duration::from_millis(1234);

    demo.animator.update(&mut demo.scene, elapsed);
    let first = demo.scene.transform(demo.earth_orbit).rotation;

    // the driver may replay a timestamp; nothing must accumulate
    demo.animator.update(&mut demo.scene, elapsed);
    demo.animator.update(&mut demo.scene, elapsed);
    let third = demo.scene.transform(demo.earth_orbit).rotation;

    assert_eq!(first, third);
}

#[test]
fn spotlight_keeps_aiming_at_the_orbiting_sphere() {
    let mut demo = spotlight::build();

    // 1.8 s at 50 deg/s is a quarter turn: (3, 0.5, 0) -> (0, 0.5, -3)
    demo.animator
        .update(&mut demo.scene, Duration::from_millis(1800));

    let target = demo.scene.lights[0].target;
    assert_relative_eq!(target.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(target.y, 0.5, epsilon = 1e-4);
    assert_relative_eq!(target.z, -3.0, epsilon = 1e-4);

    let sphere_world = demo.scene.world_transform(demo.sphere).position;
    assert_relative_eq!(target.x, sphere_world.x, epsilon = 1e-6);
    assert_relative_eq!(target.z, sphere_world.z, epsilon = 1e-6);
}
