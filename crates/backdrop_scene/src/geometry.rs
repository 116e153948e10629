//! Geometry descriptors
//!
//! The scene never builds meshes. Each object carries the parameters a
//! renderer needs to build (or look up) the matching primitive.

use crate::generators::{grid_lines, ring_point};
use backdrop_core::Vec3;
use serde::{Deserialize, Serialize};

/// Kind of primitive, without its parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Cube,
    Icosahedron,
    Sphere,
    Torus,
    Cone,
    PointCloud,
    LineSegment,
    Grid,
}

/// Primitive plus the parameters that shape it
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Axis-aligned box with equal sides
    Cube { size: f32 },
    /// Icosahedron; `detail` subdivides each face
    Icosahedron { radius: f32, detail: u32 },
    /// UV sphere
    Sphere { radius: f32, segments: u32 },
    /// Ring lying in the XY plane before rotation
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// Upright cone, apex toward +Y
    Cone { radius: f32, height: f32, segments: u32 },
    /// `count` points supplied by a particle system or starfield
    PointCloud { count: usize },
    /// Straight line between two world positions
    LineSegment { start: Vec3, end: Vec3 },
    /// Square line grid on the XZ plane
    Grid { size: f32, divisions: u32 },
}

impl Geometry {
    pub fn cube(size: f32) -> Self {
        Geometry::Cube { size }
    }

    pub fn icosahedron(radius: f32) -> Self {
        Geometry::Icosahedron { radius, detail: 0 }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        Geometry::Sphere { radius, segments }
    }

    /// Torus with the tessellation used for thin decorative rings
    pub fn torus(radius: f32, tube: f32) -> Self {
        Geometry::Torus {
            radius,
            tube,
            radial_segments: 16,
            tubular_segments: 100,
        }
    }

    pub fn cone(radius: f32, height: f32) -> Self {
        Geometry::Cone {
            radius,
            height,
            segments: 8,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Cube { .. } => GeometryKind::Cube,
            Geometry::Icosahedron { .. } => GeometryKind::Icosahedron,
            Geometry::Sphere { .. } => GeometryKind::Sphere,
            Geometry::Torus { .. } => GeometryKind::Torus,
            Geometry::Cone { .. } => GeometryKind::Cone,
            Geometry::PointCloud { .. } => GeometryKind::PointCloud,
            Geometry::LineSegment { .. } => GeometryKind::LineSegment,
            Geometry::Grid { .. } => GeometryKind::Grid,
        }
    }

    /// Radius of a sphere around the local origin that contains the primitive
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Geometry::Cube { size } => size * 0.5 * 3.0f32.sqrt(),
            Geometry::Icosahedron { radius, .. } | Geometry::Sphere { radius, .. } => radius,
            Geometry::Torus { radius, tube, .. } => radius + tube,
            Geometry::Cone { radius, height, .. } => radius.hypot(height * 0.5),
            Geometry::PointCloud { .. } => 0.0,
            Geometry::LineSegment { start, end } => start.length().max(end.length()),
            Geometry::Grid { size, .. } => size * 0.5 * 2.0f32.sqrt(),
        }
    }

    /// Local line segments for renderers that draw this primitive as lines
    ///
    /// Tori give their center circle in the XY plane. Solid primitives and
    /// point clouds have no line form.
    pub fn line_list(&self) -> Vec<(Vec3, Vec3)> {
        match *self {
            Geometry::LineSegment { start, end } => vec![(start, end)],
            Geometry::Grid { size, divisions } => grid_lines(size, divisions),
            Geometry::Torus {
                radius,
                tubular_segments,
                ..
            } => {
                let n = tubular_segments as usize;
                let at = |i: usize| {
                    let p = ring_point(i % n, n, radius);
                    Vec3::new(p.x, p.z, 0.0)
                };
                (0..n).map(|i| (at(i), at(i + 1))).collect()
            }
            _ => Vec::new(),
        }
    }
}
