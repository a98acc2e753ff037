//! Parametric solids for the section meshes.
//!
//! Each generator produces an indexed triangle list with smooth per-vertex
//! normals and counter-clockwise front faces.

use std::f32::consts::TAU;

use glam::Vec3;

/// One mesh vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// CPU-side indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex array.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

/// The solid shown in one scroll section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionShape {
    /// Ring torus lying in the XY plane.
    Torus {
        /// Distance from the center to the middle of the tube.
        radius: f32,
        /// Tube radius.
        tube: f32,
        /// Segments around the tube.
        radial_segments: u32,
        /// Segments around the ring.
        tubular_segments: u32,
    },
    /// Closed cone with its apex on +Y.
    Cone {
        /// Base radius.
        radius: f32,
        /// Apex-to-base height.
        height: f32,
        /// Segments around the axis.
        radial_segments: u32,
    },
    /// (p, q) torus knot.
    TorusKnot {
        /// Overall knot radius.
        radius: f32,
        /// Tube radius.
        tube: f32,
        /// Segments along the knot.
        tubular_segments: u32,
        /// Segments around the tube.
        radial_segments: u32,
        /// Windings around the axis of rotational symmetry.
        p: u32,
        /// Windings around the interior circle.
        q: u32,
    },
}

impl SectionShape {
    /// The three landing sections, top to bottom.
    pub const LANDING: [Self; 3] = [
        Self::Torus {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 16,
            tubular_segments: 60,
        },
        Self::Cone {
            radius: 1.0,
            height: 2.0,
            radial_segments: 32,
        },
        Self::TorusKnot {
            radius: 0.8,
            tube: 0.35,
            tubular_segments: 100,
            radial_segments: 16,
            p: 2,
            q: 3,
        },
    ];

    /// Short name for logs and GPU labels.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Torus { .. } => "torus",
            Self::Cone { .. } => "cone",
            Self::TorusKnot { .. } => "torus knot",
        }
    }

    /// Tessellate the shape.
    #[must_use]
    pub fn build(&self) -> MeshData {
        match *self {
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(radius, tube, radial_segments, tubular_segments),
            Self::Cone {
                radius,
                height,
                radial_segments,
            } => cone(radius, height, radial_segments),
            Self::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => torus_knot(radius, tube, tubular_segments, radial_segments, p, q),
        }
    }
}

/// Push the two triangles of a grid quad `(a, b, c, d)`.
fn push_quad(indices: &mut Vec<u32>, a: u32, b: u32, c: u32, d: u32) {
    indices.extend_from_slice(&[a, b, d, b, c, d]);
}

fn torus(radius: f32, tube: f32, radial: u32, tubular: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            let position =
                Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.vertices.push(MeshVertex::new(
                position,
                (position - center).normalize_or_zero(),
            ));
        }
    }

    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            push_quad(
                &mut mesh.indices,
                row * j + i - 1,
                row * (j - 1) + i - 1,
                row * (j - 1) + i,
                row * j + i,
            );
        }
    }
    mesh
}

fn cone(radius: f32, height: f32, radial: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height / 2.0;
    let slope = radius / height;

    // Side: an apex row (degenerate ring of radius 0) and a base row.
    for row in 0..=1_u32 {
        let r = row as f32 * radius;
        let y = half - row as f32 * height;
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.push(MeshVertex::new(
                Vec3::new(r * sin, y, r * cos),
                Vec3::new(sin, slope, cos).normalize(),
            ));
        }
    }
    let row = radial + 1;
    for x in 0..radial {
        // Only the lower triangle of each quad; the upper one collapses
        // onto the apex.
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;
        mesh.indices.extend_from_slice(&[b, c, d]);
    }

    // Base cap facing -Y.
    let down = Vec3::NEG_Y;
    let center_start = mesh.vertices.len() as u32;
    for _ in 0..radial {
        mesh.vertices.push(MeshVertex::new(Vec3::new(0.0, -half, 0.0), down));
    }
    let ring_start = mesh.vertices.len() as u32;
    for x in 0..=radial {
        let theta = x as f32 / radial as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.vertices.push(MeshVertex::new(
            Vec3::new(radius * sin, -half, radius * cos),
            down,
        ));
    }
    for x in 0..radial {
        let c = center_start + x;
        let i = ring_start + x;
        mesh.indices.extend_from_slice(&[i + 1, i, c]);
    }
    mesh
}

/// Point on the (p, q) knot curve at parameter `u`.
fn knot_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

fn torus_knot(
    radius: f32,
    tube: f32,
    tubular: u32,
    radial: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let mut mesh = MeshData::default();
    let (pf, qf) = (p as f32, q as f32);

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * pf * TAU;
        let p1 = knot_point(u, pf, qf, radius);
        let p2 = knot_point(u + 0.01, pf, qf, radius);

        // Frenet-like frame from the tangent and the curve sum.
        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1);
        let normal = binormal.cross(tangent).normalize_or_zero();
        let binormal = binormal.normalize_or_zero();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + normal * cx + binormal * cy;
            mesh.vertices.push(MeshVertex::new(
                position,
                (position - p1).normalize_or_zero(),
            ));
        }
    }

    let row = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
            push_quad(
                &mut mesh.indices,
                row * (j - 1) + (i - 1),
                row * j + (i - 1),
                row * j + i,
                row * (j - 1) + i,
            );
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(mesh: &MeshData) {
        assert_eq!(mesh.indices.len() % 3, 0);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }

    #[test]
    fn torus_counts() {
        let mesh = SectionShape::LANDING[0].build();
        assert_eq!(mesh.vertices.len(), 17 * 61);
        assert_eq!(mesh.indices.len(), 16 * 60 * 6);
        assert_well_formed(&mesh);
    }

    #[test]
    fn torus_stays_within_its_radii() {
        let mesh = torus(1.0, 0.4, 16, 60);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let planar = p.truncate().length();
            assert!(planar >= 0.6 - 1e-4 && planar <= 1.4 + 1e-4);
            assert!(p.z.abs() <= 0.4 + 1e-4);
        }
    }

    #[test]
    fn cone_counts_and_extent() {
        let mesh = SectionShape::LANDING[1].build();
        // Side rows + cap centers + cap ring.
        assert_eq!(mesh.vertices.len(), 2 * 33 + 32 + 33);
        assert_eq!(mesh.indices.len(), 32 * 3 * 2);
        assert_well_formed(&mesh);

        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.position[1]).collect();
        let max = ys.iter().copied().fold(f32::MIN, f32::max);
        let min = ys.iter().copied().fold(f32::MAX, f32::min);
        assert_eq!(max, 1.0);
        assert_eq!(min, -1.0);
    }

    #[test]
    fn cone_cap_faces_down() {
        let mesh = cone(1.0, 2.0, 8);
        let last = &mesh.indices[mesh.indices.len() - 3..];
        let [a, b, c] = [last[0], last[1], last[2]].map(|i| {
            Vec3::from_array(mesh.vertices[i as usize].position)
        });
        let face_normal = (b - a).cross(c - a);
        assert!(face_normal.y < 0.0);
    }

    #[test]
    fn torus_knot_counts() {
        let mesh = SectionShape::LANDING[2].build();
        assert_eq!(mesh.vertices.len(), 101 * 17);
        assert_eq!(mesh.indices.len(), 100 * 16 * 6);
        assert_well_formed(&mesh);
    }

    #[test]
    fn landing_names() {
        let names: Vec<&str> =
            SectionShape::LANDING.iter().map(SectionShape::name).collect();
        assert_eq!(names, ["torus", "cone", "torus knot"]);
    }
}
