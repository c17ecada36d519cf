//! Per-particle simulation state.

use serde::{Deserialize, Serialize};

use drape_types::{Scalar, TriangleId, Vec3, VertexId};

/// A simulated particle.
///
/// `position` is the committed location from the last completed step and is
/// never written during a solve pass. Constraints only ever move `predicted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Stable identity, `0..|V|-1`.
    pub id: VertexId,
    /// Committed position.
    pub position: Vec3,
    /// Working position targeted by constraint projection.
    pub predicted: Vec3,
    /// Velocity.
    pub velocity: Vec3,
    /// Mass (kg).
    pub mass: Scalar,
    /// Inverse mass; `0.0` means pinned.
    pub inv_mass: Scalar,
    /// One incident triangle, `None` for an isolated vertex.
    pub face: Option<TriangleId>,
}

impl Vertex {
    /// Creates a vertex at rest. `mass` must be positive and finite; the
    /// store validates this before calling.
    pub(crate) fn new(id: VertexId, position: Vec3, mass: Scalar) -> Self {
        Self {
            id,
            position,
            predicted: position,
            velocity: Vec3::ZERO,
            mass,
            inv_mass: 1.0 / mass,
            face: None,
        }
    }

    /// Returns true if the vertex is immovable.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Makes the vertex immovable. Mass is kept so it can be unpinned later.
    pub fn pin(&mut self) {
        self.inv_mass = 0.0;
        self.velocity = Vec3::ZERO;
    }

    /// Restores the inverse mass from `mass`.
    pub fn unpin(&mut self) {
        self.inv_mass = 1.0 / self.mass;
    }

    /// Returns true if no triangle references this vertex.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.face.is_none()
    }
}
