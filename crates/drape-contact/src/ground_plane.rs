//! Infinite plane obstacle.

use serde::{Deserialize, Serialize};

use drape_mesh::Mesh;
use drape_types::{Scalar, Vec3};

use crate::contact::Contact;
use crate::query::ContactQuery;

/// A plane through `point` with unit outward `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl GroundPlane {
    /// Horizontal ground at `y = height`, facing `+Y`.
    pub fn new(height: Scalar) -> Self {
        Self {
            point: Vec3::new(0.0, height, 0.0),
            normal: Vec3::Y,
        }
    }

    /// Arbitrary plane. Falls back to `+Y` if `normal` cannot be normalized.
    pub fn with_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.try_normalize().unwrap_or(Vec3::Y),
        }
    }

    /// Signed distance of `p` above the plane.
    pub fn signed_distance(&self, p: Vec3) -> Scalar {
        self.normal.dot(p - self.point)
    }
}

impl ContactQuery for GroundPlane {
    fn detect(&self, mesh: &Mesh, out: &mut Vec<Contact>) {
        let surface = self.point + self.normal * mesh.thickness;
        for v in mesh.vertices.iter() {
            if v.is_pinned() {
                continue;
            }
            let distance = self.normal.dot(v.predicted - surface);
            if distance < 0.0 {
                out.push(Contact {
                    vertex: v.id,
                    point: v.predicted - self.normal * distance,
                    normal: self.normal,
                    distance,
                });
            }
        }
    }

    fn name(&self) -> &str {
        "ground_plane"
    }
}
