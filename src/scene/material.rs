//! Surface materials for mesh rendering.
//!
//! A [`Material`] is a plain description; it is packed into a
//! [`MaterialUniform`] when the renderer uploads the scene.

/// Shading parameters for a triangle mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    /// 0.0 is a mirror-like highlight, 1.0 is fully diffuse.
    pub roughness: f32,
    /// Scales the specular contribution.
    pub metalness: f32,
    /// Derive normals per-triangle in the fragment shader instead of
    /// interpolating vertex normals.
    pub flat_shading: bool,
    /// Multiply the base color with per-vertex colors.
    pub vertex_colors: bool,
    /// Render back faces too (disables culling).
    pub double_sided: bool,
}

impl Material {
    /// A glossy colored surface, the default look for simple demos.
    pub fn shiny(color: [f32; 3]) -> Self {
        Self {
            color,
            roughness: 0.3,
            ..Self::default()
        }
    }

    /// A rough/metallic surface description.
    pub fn standard(color: [f32; 3], roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            ..Self::default()
        }
    }

    pub fn with_emissive(mut self, emissive: [f32; 3]) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_flat_shading(mut self) -> Self {
        self.flat_shading = true;
        self
    }

    pub fn with_vertex_colors(mut self) -> Self {
        self.vertex_colors = true;
        self
    }

    pub fn with_double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub(crate) fn to_uniform(&self, receive_shadow: bool) -> MaterialUniform {
        MaterialUniform {
            color: self.color,
            roughness: self.roughness,
            emissive: self.emissive,
            metalness: self.metalness,
            flat_shading: self.flat_shading as u32,
            vertex_colors: self.vertex_colors as u32,
            receive_shadow: receive_shadow as u32,
            _padding: 0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            roughness: 0.5,
            metalness: 0.0,
            flat_shading: false,
            vertex_colors: false,
            double_sided: false,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    color: [f32; 3],
    roughness: f32,
    emissive: [f32; 3],
    metalness: f32,
    flat_shading: u32,
    vertex_colors: u32,
    receive_shadow: u32,
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
}

/// Convert a `0xRRGGBB` color literal into linear-ish float RGB.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hex_colors_unpack_per_channel() {
        let c = rgb(0x2233ff);
        assert_relative_eq!(c[0], 0x22 as f32 / 255.0);
        assert_relative_eq!(c[1], 0x33 as f32 / 255.0);
        assert_relative_eq!(c[2], 1.0);
    }

    #[test]
    fn uniform_flags_round_trip() {
        let material = Material::shiny([1.0, 0.0, 0.0])
            .with_flat_shading()
            .with_vertex_colors();
        let uniform = material.to_uniform(true);
        assert_eq!(uniform.flat_shading, 1);
        assert_eq!(uniform.vertex_colors, 1);
        assert_eq!(uniform.receive_shadow, 1);
    }
}
