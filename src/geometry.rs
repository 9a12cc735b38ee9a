//! Procedural geometry builders.
//!
//! All builders return plain CPU-side [`Geometry`] / [`LineGeometry`]; the
//! renderer uploads them later. Parametric surfaces share the usual grid
//! layout: rows and columns of `(segments + 1)` vertices with two triangles
//! per cell.

use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Point3, Rad, Vector3};

use crate::scene::mesh::{Geometry, LineGeometry, MeshVertex};

/// An axis-aligned box centered on the origin, one color, per-face normals.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Geometry {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    // four corners per face so each face gets its own normal
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]],
        ),
        (
            [0.0, 0.0, -1.0],
            [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]],
        ),
        (
            [1.0, 0.0, 0.0],
            [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]],
        ),
        (
            [0.0, 1.0, 0.0],
            [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]],
        ),
        (
            [0.0, -1.0, 0.0],
            [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for position in corners {
            vertices.push(MeshVertex {
                position,
                normal,
                color: [1.0, 1.0, 1.0],
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    Geometry::new(vertices, indices)
}

/// A flat quad in the xy plane facing +z, centered on the origin.
pub fn plane(width: f32, height: f32) -> Geometry {
    let (x, y) = (width / 2.0, height / 2.0);
    let normal = [0.0, 0.0, 1.0];
    let vertices = vec![
        MeshVertex {
            position: [-x, -y, 0.0],
            normal,
            color: [1.0, 1.0, 1.0],
        },
        MeshVertex {
            position: [x, -y, 0.0],
            normal,
            color: [1.0, 1.0, 1.0],
        },
        MeshVertex {
            position: [x, y, 0.0],
            normal,
            color: [1.0, 1.0, 1.0],
        },
        MeshVertex {
            position: [-x, y, 0.0],
            normal,
            color: [1.0, 1.0, 1.0],
        },
    ];
    Geometry::new(vertices, vec![0, 1, 2, 0, 2, 3])
}

/// A full UV sphere.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    sphere_sweep(radius, width_segments, height_segments, Rad(0.0), Rad(TAU))
}

/// A UV sphere limited to a horizontal sweep of `phi_length`, starting at
/// `phi_start`. A sweep of pi gives a half sphere.
pub fn sphere_sweep(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    phi_start: Rad<f32>,
    phi_length: Rad<f32>,
) -> Geometry {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let mut vertices = Vec::new();
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = phi_start.0 + u * phi_length.0;
            let position = [
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ];
            let normal = Vector3::from(position).normalize();
            vertices.push(MeshVertex {
                position,
                normal: normal.into(),
                color: [1.0, 1.0, 1.0],
            });
        }
    }

    let mut indices = Vec::new();
    let columns = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * columns + ix + 1;
            let b = iy * columns + ix;
            let c = (iy + 1) * columns + ix;
            let d = (iy + 1) * columns + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    Geometry::new(vertices, indices)
}

/// A torus in the xy plane, centered on the origin.
pub fn torus(radius: f32, tube_radius: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(2);
    let tubular_segments = tubular_segments.max(3);

    let mut vertices = Vec::new();
    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let position = [
                (radius + tube_radius * v.cos()) * u.cos(),
                (radius + tube_radius * v.cos()) * u.sin(),
                tube_radius * v.sin(),
            ];
            let center = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (Vector3::from(position) - center).normalize();
            vertices.push(MeshVertex {
                position,
                normal: normal.into(),
                color: [1.0, 1.0, 1.0],
            });
        }
    }

    let mut indices = Vec::new();
    let columns = tubular_segments + 1;
    for j in 0..radial_segments {
        for i in 0..tubular_segments {
            let a = (j + 1) * columns + i;
            let b = j * columns + i;
            let c = j * columns + i + 1;
            let d = (j + 1) * columns + i + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    Geometry::new(vertices, indices)
}

/// A tube swept along an arbitrary curve.
///
/// `curve` is sampled at `tubular_segments + 1` evenly spaced parameters in
/// `[0, 1]`. Frames along the curve are built by parallel transport, which
/// avoids the sudden flips a naive Frenet frame shows on straight stretches.
pub fn tube_along(
    curve: impl Fn(f32) -> Point3<f32>,
    tubular_segments: u32,
    radius: f32,
    radial_segments: u32,
) -> Geometry {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);

    let samples: Vec<Point3<f32>> = (0..=tubular_segments)
        .map(|i| curve(i as f32 / tubular_segments as f32))
        .collect();

    // central-difference tangents, one-sided at the ends
    let tangents: Vec<Vector3<f32>> = (0..samples.len())
        .map(|i| {
            let prev = samples[i.saturating_sub(1)];
            let next = samples[(i + 1).min(samples.len() - 1)];
            let diff = next - prev;
            if diff.magnitude2() > 0.0 {
                diff.normalize()
            } else {
                Vector3::unit_z()
            }
        })
        .collect();

    // initial normal: any vector perpendicular to the first tangent
    let seed = if tangents[0].x.abs() < 0.9 {
        Vector3::unit_x()
    } else {
        Vector3::unit_y()
    };
    let mut normal = (seed - tangents[0] * seed.dot(tangents[0])).normalize();

    let mut vertices = Vec::new();
    for (sample, tangent) in samples.iter().zip(tangents.iter()) {
        // transport the previous normal into the new tangent plane
        let projected = normal - *tangent * normal.dot(*tangent);
        if projected.magnitude2() > 1e-12 {
            normal = projected.normalize();
        }
        let binormal = tangent.cross(normal);
        for j in 0..=radial_segments {
            let angle = j as f32 / radial_segments as f32 * TAU;
            let dir = normal * angle.cos() + binormal * angle.sin();
            let position = sample + dir * radius;
            vertices.push(MeshVertex {
                position: position.into(),
                normal: dir.into(),
                color: [1.0, 1.0, 1.0],
            });
        }
    }

    let mut indices = Vec::new();
    let columns = radial_segments + 1;
    for i in 0..tubular_segments {
        for j in 0..radial_segments {
            let a = i * columns + j;
            let b = (i + 1) * columns + j;
            let c = (i + 1) * columns + j + 1;
            let d = i * columns + j + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    Geometry::new(vertices, indices)
}

/// A tube along a quadratic Bezier arc, the classic demo curve.
pub fn bezier_tube(
    control: [Point3<f32>; 3],
    tubular_segments: u32,
    radius: f32,
    radial_segments: u32,
) -> Geometry {
    let [p0, p1, p2] = control;
    tube_along(
        move |t| {
            let a = (1.0 - t) * (1.0 - t);
            let b = 2.0 * (1.0 - t) * t;
            let c = t * t;
            Point3::new(
                a * p0.x + b * p1.x + c * p2.x,
                a * p0.y + b * p1.y + c * p2.y,
                a * p0.z + b * p1.z + c * p2.z,
            )
        },
        tubular_segments,
        radius,
        radial_segments,
    )
}

/// A (p, q) torus knot swept as a tube.
pub fn torus_knot(
    radius: f32,
    tube_radius: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> Geometry {
    let (p, q) = (p as f32, q as f32);
    tube_along(
        move |t| {
            let u = t * TAU * p;
            let cs = (q / p * u).cos();
            Point3::new(
                radius * (2.0 + cs) * 0.5 * u.cos(),
                radius * (2.0 + cs) * 0.5 * u.sin(),
                radius * (q / p * u).sin() * 0.5,
            )
        },
        tubular_segments,
        tube_radius,
        radial_segments,
    )
}

/// Extract the unique edges of a mesh as colored line segments.
pub fn wireframe(geometry: &Geometry, color: [f32; 3]) -> LineGeometry {
    let mut seen: HashSet<(u32, u32)> = HashSet::new();
    let mut lines = LineGeometry::default();
    for triangle in geometry.indices.chunks_exact(3) {
        for (a, b) in [
            (triangle[0], triangle[1]),
            (triangle[1], triangle[2]),
            (triangle[2], triangle[0]),
        ] {
            let edge = (a.min(b), a.max(b));
            if seen.insert(edge) {
                lines.push_segment(
                    geometry.vertices[edge.0 as usize].position,
                    geometry.vertices[edge.1 as usize].position,
                    color,
                );
            }
        }
    }
    lines
}

/// One line per vertex pointing along its normal, for inspecting shading.
pub fn vertex_normals(geometry: &Geometry, length: f32, color: [f32; 3]) -> LineGeometry {
    let mut lines = LineGeometry::default();
    for vertex in &geometry.vertices {
        let from = Vector3::from(vertex.position);
        let to = from + Vector3::from(vertex.normal) * length;
        lines.push_segment(from.into(), to.into(), color);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_indices_in_bounds(geometry: &Geometry) {
        let len = geometry.vertices.len() as u32;
        assert!(geometry.indices.iter().all(|&i| i < len));
        assert_eq!(geometry.indices.len() % 3, 0);
    }

    fn assert_unit_normals(geometry: &Geometry) {
        for vertex in &geometry.vertices {
            let n = Vector3::from(vertex.normal);
            assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn cuboid_has_a_face_per_side() {
        let geometry = cuboid(1.0, 1.0, 1.0);
        assert_eq!(geometry.vertices.len(), 24);
        assert_eq!(geometry.triangle_count(), 12);
        assert_indices_in_bounds(&geometry);
        assert_unit_normals(&geometry);
    }

    #[test]
    fn sphere_vertices_sit_on_the_radius() {
        let geometry = sphere(1.5, 16, 12);
        assert_indices_in_bounds(&geometry);
        for vertex in &geometry.vertices {
            assert_relative_eq!(
                Vector3::from(vertex.position).magnitude(),
                1.5,
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn half_sphere_spans_half_the_sweep() {
        let geometry = sphere_sweep(1.0, 8, 8, Rad(0.0), Rad(PI));
        // a sweep of pi keeps z >= 0 in this parametrization
        for vertex in &geometry.vertices {
            assert!(vertex.position[2] >= -1e-5);
        }
    }

    #[test]
    fn torus_normals_point_away_from_the_ring() {
        let geometry = torus(0.4, 0.1, 8, 12);
        assert_indices_in_bounds(&geometry);
        assert_unit_normals(&geometry);
        // stays within the outer radius
        for vertex in &geometry.vertices {
            assert!(Vector3::from(vertex.position).magnitude() <= 0.5 + 1e-4);
        }
    }

    #[test]
    fn tube_follows_its_curve() {
        let geometry = tube_along(
            |t| Point3::new(t * 10.0, 0.0, 0.0),
            4,
            0.5,
            6,
        );
        assert_indices_in_bounds(&geometry);
        assert_unit_normals(&geometry);
        // every ring vertex sits at the tube radius from the straight axis
        for vertex in &geometry.vertices {
            let d = (vertex.position[1] * vertex.position[1]
                + vertex.position[2] * vertex.position[2])
                .sqrt();
            assert_relative_eq!(d, 0.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn torus_knot_is_closed_and_valid() {
        let geometry = torus_knot(1.0, 0.3, 64, 8, 2, 3);
        assert_indices_in_bounds(&geometry);
        assert_unit_normals(&geometry);
    }

    #[test]
    fn wireframe_dedups_shared_edges() {
        let quad = plane(2.0, 2.0);
        let lines = wireframe(&quad, [1.0, 1.0, 0.0]);
        // 2 triangles sharing one edge: 5 unique edges
        assert_eq!(lines.segment_count(), 5);
    }

    #[test]
    fn normals_helper_draws_one_segment_per_vertex() {
        let quad = plane(2.0, 2.0);
        let lines = vertex_normals(&quad, 0.1, [1.0, 1.0, 0.0]);
        assert_eq!(lines.segment_count(), quad.vertices.len());
        // segments point along +z for a plane
        assert_relative_eq!(lines.vertices[1].position[2], 0.1);
    }
}
