//! Contact data handed from detection to response.

use serde::{Deserialize, Serialize};

use drape_types::{Vec3, VertexId};

/// A vertex that must be pushed back onto a contact plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// The penetrating vertex.
    pub vertex: VertexId,
    /// A point on the contact plane.
    pub point: Vec3,
    /// Unit outward normal of the contact plane.
    pub normal: Vec3,
    /// Signed distance of the predicted position from the plane
    /// (negative = penetrating).
    pub distance: f64,
}

impl Contact {
    /// Returns the penetration depth (positive if penetrating, zero otherwise).
    pub fn penetration_depth(&self) -> f64 {
        (-self.distance).max(0.0)
    }
}
