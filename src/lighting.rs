//! Light sources and their packed GPU uniform.
//!
//! Scenes carry a small list of [`Light`]s; the renderer packs them into one
//! fixed-capacity [`LightsUniform`]. At most one spot light casts shadows,
//! its view-projection matrix rides along in the same uniform so both the
//! shadow pass and the forward pass agree on it.

use bytemuck::Zeroable;
use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3};

use crate::camera::OPENGL_TO_WGPU_MATRIX;

/// Hard cap on the number of lights packed into the uniform.
pub const MAX_LIGHTS: usize = 4;

/// Resolution of the (square) spot shadow map.
pub const SHADOW_MAP_SIZE: u32 = 2048;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Parallel rays along `target - position`.
    Directional,
    /// A cone from `position` toward `target`.
    Spot {
        /// Half-angle of the cone.
        angle: Rad<f32>,
        /// 0.0 is a hard edge, 1.0 fades from the cone axis outward.
        penumbra: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub cast_shadows: bool,
}

impl Light {
    pub fn directional(color: [f32; 3], intensity: f32, position: Point3<f32>) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            intensity,
            position,
            target: Point3::origin(),
            cast_shadows: false,
        }
    }

    pub fn spot(
        color: [f32; 3],
        intensity: f32,
        position: Point3<f32>,
        angle: impl Into<Rad<f32>>,
        penumbra: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot {
                angle: angle.into(),
                penumbra,
            },
            color,
            intensity,
            position,
            target: Point3::origin(),
            cast_shadows: false,
        }
    }

    pub fn with_shadows(mut self) -> Self {
        self.cast_shadows = true;
        self
    }

    fn direction(&self) -> Vector3<f32> {
        let dir = self.target - self.position;
        if dir.magnitude2() > 0.0 {
            dir.normalize()
        } else {
            -Vector3::unit_y()
        }
    }

    /// View-projection from the light's point of view, for shadow mapping.
    pub(crate) fn shadow_view_proj(&self) -> Matrix4<f32> {
        let fovy = match self.kind {
            // the full cone plus a little margin so the penumbra stays inside
            LightKind::Spot { angle, .. } => Rad(angle.0 * 2.2),
            LightKind::Directional => Rad(std::f32::consts::FRAC_PI_2),
        };
        // pick an up vector not parallel to the light direction
        let dir = self.direction();
        let up = if dir.y.abs() > 0.99 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        let view = Matrix4::look_at_rh(self.position, self.target, up);
        let proj = cgmath::perspective(fovy, 1.0, 0.5, 100.0);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    fn to_raw(&self) -> LightRaw {
        let (kind, cos_outer, cos_inner) = match self.kind {
            LightKind::Directional => (0, -1.0, -1.0),
            LightKind::Spot { angle, penumbra } => {
                let penumbra = penumbra.clamp(0.0, 1.0);
                let outer = angle.0.cos();
                let inner = (angle.0 * (1.0 - penumbra)).cos();
                // keep the smoothstep edges apart for hard-edged cones
                (1, outer, inner.max(outer + 1e-4))
            }
        };
        LightRaw {
            position: [self.position.x, self.position.y, self.position.z],
            kind,
            direction: self.direction().into(),
            cos_outer,
            color: self.color,
            intensity: self.intensity,
            cos_inner,
            cast_shadows: self.cast_shadows as u32,
            _padding: [0; 2],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRaw {
    position: [f32; 3],
    kind: u32,
    direction: [f32; 3],
    cos_outer: f32,
    color: [f32; 3],
    intensity: f32,
    cos_inner: f32,
    cast_shadows: u32,
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: [u32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    shadow_view_proj: [[f32; 4]; 4],
    lights: [LightRaw; MAX_LIGHTS],
    count: u32,
    _padding: [u32; 3],
}

impl LightsUniform {
    pub fn from_lights(lights: &[Light]) -> Self {
        if lights.len() > MAX_LIGHTS {
            log::warn!(
                "scene has {} lights but only the first {} are rendered",
                lights.len(),
                MAX_LIGHTS
            );
        }
        let mut raw = [LightRaw::zeroed(); MAX_LIGHTS];
        let count = lights.len().min(MAX_LIGHTS);
        for (slot, light) in raw.iter_mut().zip(lights.iter()) {
            *slot = light.to_raw();
        }
        let shadow_view_proj = shadow_caster(lights)
            .map(|light| light.shadow_view_proj())
            .unwrap_or_else(Matrix4::identity);
        Self {
            shadow_view_proj: shadow_view_proj.into(),
            lights: raw,
            count: count as u32,
            _padding: [0; 3],
        }
    }
}

/// The single light whose shadow map is rendered, if any.
pub(crate) fn shadow_caster(lights: &[Light]) -> Option<&Light> {
    lights
        .iter()
        .take(MAX_LIGHTS)
        .find(|light| light.cast_shadows && matches!(light.kind, LightKind::Spot { .. }))
}

pub fn mk_buffer(device: &wgpu::Device, uniform: LightsUniform) -> wgpu::Buffer {
    use wgpu::util::DeviceExt;
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Lights Buffer"),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Deg;

    #[test]
    fn uniform_clamps_to_capacity() {
        let lights: Vec<Light> = (0..6)
            .map(|i| Light::directional([1.0; 3], 1.0, Point3::new(i as f32, 1.0, 0.0)))
            .collect();
        let uniform = LightsUniform::from_lights(&lights);
        assert_eq!(uniform.count, MAX_LIGHTS as u32);
    }

    #[test]
    fn only_spot_lights_cast_shadows() {
        let lights = vec![
            Light::directional([1.0; 3], 0.5, Point3::new(0.0, 5.0, 0.0)).with_shadows(),
            Light::spot([1.0; 3], 2.0, Point3::new(0.0, 5.0, 0.0), Deg(30.0), 0.2).with_shadows(),
        ];
        let caster = shadow_caster(&lights).expect("spot should cast");
        assert!(matches!(caster.kind, LightKind::Spot { .. }));
    }

    #[test]
    fn spot_cone_edges_stay_ordered() {
        // zero penumbra must not collapse the smoothstep edges
        let light = Light::spot([1.0; 3], 1.0, Point3::new(0.0, 5.0, 0.0), Deg(40.0), 0.0);
        let raw = light.to_raw();
        assert!(raw.cos_inner > raw.cos_outer);
    }

    #[test]
    fn straight_down_light_still_has_a_view() {
        let light = Light::spot([1.0; 3], 1.0, Point3::new(0.0, 5.0, 0.0), Deg(30.0), 1.0);
        let m = light.shadow_view_proj();
        // a degenerate up vector would produce NaNs here
        assert!(m.x.x.is_finite() && m.w.w.is_finite());
    }
}
