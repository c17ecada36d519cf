//! Analytic sphere obstacle.

use serde::{Deserialize, Serialize};

use drape_mesh::Mesh;
use drape_types::constants::DEGENERATE_THRESHOLD;
use drape_types::{Scalar, Vec3};

use crate::contact::Contact;
use crate::query::ContactQuery;

/// A solid sphere. Contacts use the tangent plane at the closest surface
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: Scalar,
}

impl SphereCollider {
    pub fn new(center: Vec3, radius: Scalar) -> Self {
        Self { center, radius }
    }
}

impl ContactQuery for SphereCollider {
    fn detect(&self, mesh: &Mesh, out: &mut Vec<Contact>) {
        let shell = self.radius + mesh.thickness;
        for v in mesh.vertices.iter() {
            if v.is_pinned() {
                continue;
            }
            let offset = v.predicted - self.center;
            let dist = offset.length();
            if dist >= shell {
                continue;
            }
            // Exactly at the center: push out along +Y.
            let normal = if dist > DEGENERATE_THRESHOLD {
                offset / dist
            } else {
                Vec3::Y
            };
            out.push(Contact {
                vertex: v.id,
                point: self.center + normal * shell,
                normal,
                distance: dist - shell,
            });
        }
    }

    fn name(&self) -> &str {
        "sphere_collider"
    }
}
