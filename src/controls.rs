//! Orbit controls: rotate, pan and zoom the camera around a focus point.
//!
//! Window events track button/modifier state and the scroll wheel; raw mouse
//! motion from device events drives the actual orbit/pan deltas. The driver
//! calls [`OrbitControls::update_camera`] once per frame to write the result
//! back into the scene camera.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};

const MIN_PITCH: f32 = -1.54;
const MAX_PITCH: f32 = 1.54;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    None,
    Orbit,
    Pan,
}

#[derive(Debug)]
pub struct OrbitControls {
    target: Point3<f32>,
    distance: f32,
    yaw: f32,
    pitch: f32,
    dragging: Drag,
    shift_held: bool,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitControls {
    /// Derive the initial orbit state from where the camera already is.
    pub fn new(camera: &crate::camera::Camera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.magnitude().max(1e-3);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        Self {
            target: camera.target,
            distance,
            yaw,
            pitch,
            dragging: Drag::None,
            shift_held: false,
            rotate_speed: 0.005,
            pan_speed: 0.0015,
            zoom_speed: 0.1,
            min_distance: 0.2,
            max_distance: 200.0,
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_held = modifiers.state().shift_key();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.dragging = match (button, state == &ElementState::Pressed) {
                    (MouseButton::Left, true) if self.shift_held => Drag::Pan,
                    (MouseButton::Left, true) => Drag::Orbit,
                    (MouseButton::Right, true) => Drag::Pan,
                    _ => Drag::None,
                };
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 40.0,
                };
                self.zoom(amount);
            }
            _ => {}
        }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            match self.dragging {
                Drag::Orbit => self.orbit(*dx as f32, *dy as f32),
                Drag::Pan => self.pan(*dx as f32, *dy as f32),
                Drag::None => {}
            }
        }
    }

    fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.rotate_speed;
        self.pitch = (self.pitch + dy * self.rotate_speed).clamp(MIN_PITCH, MAX_PITCH);
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        let offset = self.offset();
        let forward = -offset.normalize();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward);
        let scale = self.distance * self.pan_speed;
        self.target += right * (-dx * scale) + up * (dy * scale);
    }

    pub fn zoom(&mut self, amount: f32) {
        self.distance =
            (self.distance * (1.0 - amount * self.zoom_speed)).clamp(self.min_distance, self.max_distance);
    }

    fn offset(&self) -> Vector3<f32> {
        Vector3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance
    }

    /// Write the orbit state back into the camera.
    pub fn update_camera(&self, camera: &mut crate::camera::Camera) {
        camera.target = self.target;
        camera.eye = self.target + self.offset();
        camera.up = Vector3::unit_y();
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, Projection};
    use approx::assert_relative_eq;
    use cgmath::Deg;

    fn camera_at(eye: Point3<f32>) -> Camera {
        let projection = Projection::new(800, 600, Deg(75.0), 0.1, 100.0);
        Camera::looking_at(eye, Point3::new(0.0, 0.0, 0.0), projection)
    }

    #[test]
    fn initial_state_reproduces_the_camera() {
        let mut camera = camera_at(Point3::new(7.0, 7.0, 0.0));
        let controls = OrbitControls::new(&camera);
        controls.update_camera(&mut camera);
        assert_relative_eq!(camera.eye.x, 7.0, epsilon = 1e-4);
        assert_relative_eq!(camera.eye.y, 7.0, epsilon = 1e-4);
        assert_relative_eq!(camera.eye.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn orbiting_preserves_the_distance() {
        let camera = camera_at(Point3::new(0.0, 0.0, 15.0));
        let mut controls = OrbitControls::new(&camera);
        controls.orbit(120.0, -45.0);
        let mut moved = camera.clone();
        controls.update_camera(&mut moved);
        assert_relative_eq!(
            (moved.eye - moved.target).magnitude(),
            15.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let camera = camera_at(Point3::new(0.0, 0.0, 2.0));
        let mut controls = OrbitControls::new(&camera);
        for _ in 0..1000 {
            controls.zoom(1.0);
        }
        assert_relative_eq!(controls.distance(), 0.2);
        for _ in 0..1000 {
            controls.zoom(-1.0);
        }
        assert_relative_eq!(controls.distance(), 200.0);
    }

    #[test]
    fn pitch_stops_short_of_the_poles() {
        let camera = camera_at(Point3::new(0.0, 0.0, 5.0));
        let mut controls = OrbitControls::new(&camera);
        controls.orbit(0.0, 1e6);
        let mut moved = camera.clone();
        controls.update_camera(&mut moved);
        // the eye never crosses directly above the target
        assert!(moved.eye.y < 5.0);
        assert!((moved.eye - moved.target).magnitude() > 0.0);
    }
}
