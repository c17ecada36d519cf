//! Edge-length constraint.

use drape_mesh::VertexStore;
use drape_types::constants::EPSILON;
use drape_types::{DrapeResult, Scalar, VertexId};

use crate::constraint::PositionConstraint;

/// Keeps two vertices at their rest distance.
///
/// The correction is split by inverse mass, so two equal free masses move
/// symmetrically about their midpoint and a pinned end never moves.
#[derive(Debug, Clone, PartialEq)]
pub struct StretchingConstraint {
    vertices: [VertexId; 2],
    stiffness: Scalar,
    rest_length: Scalar,
}

impl StretchingConstraint {
    /// Captures the rest length from the committed positions of `v1`, `v2`.
    pub fn new(store: &VertexStore, v1: VertexId, v2: VertexId, stiffness: Scalar) -> DrapeResult<Self> {
        store.check(v1)?;
        store.check(v2)?;
        let rest_length = (store[v1].position - store[v2].position).length();
        Ok(Self {
            vertices: [v1, v2],
            stiffness,
            rest_length,
        })
    }

    /// Rest distance.
    pub fn rest_length(&self) -> Scalar {
        self.rest_length
    }
}

impl PositionConstraint for StretchingConstraint {
    fn arity(&self) -> usize {
        2
    }

    fn stiffness(&self) -> Scalar {
        self.stiffness
    }

    fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    fn solve(&self, store: &mut VertexStore) {
        let [v1, v2] = self.vertices;
        let (p1, w1) = (store[v1].predicted, store[v1].inv_mass);
        let (p2, w2) = (store[v2].predicted, store[v2].inv_mass);

        let u = p1 - p2;
        let d = u.length();
        let u = u.normalize_or_zero();

        let sum = w1 + w2;
        if sum < EPSILON {
            return;
        }

        let lambda = self.stiffness * (d - self.rest_length) / sum;
        store[v1].predicted -= w1 * lambda * u;
        store[v2].predicted += w2 * lambda * u;
    }

    fn violation(&self, store: &VertexStore) -> Scalar {
        let [v1, v2] = self.vertices;
        (store[v1].predicted - store[v2].predicted).length() - self.rest_length
    }
}
