//! Contact-plane constraint for a single vertex.
//!
//! Built fresh every step from contact detection output and discarded after
//! that step. The projection always snaps the vertex onto the plane, and the
//! velocity correction always removes the normal component; neither is gated
//! on which side of the plane the vertex is. Detection only reports vertices
//! that have crossed the plane, which is what keeps this one-sided in
//! practice.

use drape_mesh::VertexStore;
use drape_types::constants::{DEGENERATE_THRESHOLD, EPSILON};
use drape_types::{DrapeError, DrapeResult, Scalar, Vec3, VertexId};

use crate::constraint::PositionConstraint;

/// Contact response is rigid.
pub const COLLISION_STIFFNESS: Scalar = 1.0;

/// Projects one vertex onto the contact plane `(point, normal)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionConstraint {
    vertices: [VertexId; 1],
    point: Vec3,
    normal: Vec3,
}

impl CollisionConstraint {
    /// Builds a contact constraint. `normal` is normalized here; a zero or
    /// non-finite normal is rejected.
    pub fn new(store: &VertexStore, vertex: VertexId, point: Vec3, normal: Vec3) -> DrapeResult<Self> {
        store.check(vertex)?;
        if !point.is_finite() {
            return Err(DrapeError::InvalidContact(format!(
                "non-finite contact point {point} for vertex {}",
                vertex.0
            )));
        }
        let len = normal.length();
        if !len.is_finite() || len < DEGENERATE_THRESHOLD {
            return Err(DrapeError::InvalidContact(format!(
                "contact normal {normal} for vertex {} cannot be normalized",
                vertex.0
            )));
        }
        Ok(Self {
            vertices: [vertex],
            point,
            normal: normal / len,
        })
    }

    /// A point on the contact plane.
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Unit outward normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl PositionConstraint for CollisionConstraint {
    fn arity(&self) -> usize {
        1
    }

    fn stiffness(&self) -> Scalar {
        COLLISION_STIFFNESS
    }

    fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    fn solve(&self, store: &mut VertexStore) {
        let v = &mut store[self.vertices[0]];
        if v.inv_mass < EPSILON {
            return;
        }
        let lambda = self.normal.dot(v.predicted - self.point);
        v.predicted -= lambda * self.normal;
    }

    // TODO: skip when solve() did not move the vertex (needs a per-contact flag).
    fn update_velocity(&self, store: &mut VertexStore) {
        let v = &mut store[self.vertices[0]];
        if v.inv_mass < EPSILON {
            return;
        }
        v.velocity -= v.velocity.dot(self.normal) * self.normal;
    }

    fn violation(&self, store: &VertexStore) -> Scalar {
        self.normal.dot(store[self.vertices[0]].predicted - self.point)
    }
}
