//! Dihedral-angle constraint between two triangles sharing an edge.
//!
//! ## Geometry
//!
//! ```text
//!        v3
//!       /  \
//!     v1 ── v2
//!       \  /
//!        v4
//! ```
//!
//! The two faces are `(v1, v3, v2)` and `(v2, v4, v1)`. Their normals are
//! `(v1 − v3) × (v2 − v3)` and `(v2 − v4) × (v1 − v4)`; with the vertex
//! order produced by [`Topology`](drape_mesh::Topology) both follow the mesh
//! winding.
//!
//! The angle is measured as `acos(n1 · n2)`, which is unsigned. The sign of
//! `(n1 × n2) · e` tells which way the hinge is folded and flips the
//! correction so it always moves toward the rest angle.

use drape_mesh::VertexStore;
use drape_types::constants::{DEGENERATE_THRESHOLD, EPSILON};
use drape_types::{DrapeError, DrapeResult, Scalar, Vec3, VertexId};

use crate::constraint::PositionConstraint;

/// Inverse cosine with the argument clamped to `[-1, 1]`.
///
/// Normalized dot products routinely land a few ulps outside the domain.
#[inline]
pub fn clamped_acos(d: Scalar) -> Scalar {
    d.clamp(-1.0, 1.0).acos()
}

/// Unnormalized normal of the face with apex `c` over edge `a`–`b`.
#[inline]
fn hinge_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (a - c).cross(b - c)
}

/// Splits a vector into direction and magnitude.
#[inline]
fn split(n: Vec3) -> (Vec3, Scalar) {
    let len = n.length();
    (n / len, len)
}

/// Dihedral angle of the hinge `(p1, p2)` with apexes `p3`, `p4`.
///
/// Returns `None` if either face is degenerate.
pub fn dihedral_angle(p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) -> Option<Scalar> {
    let (n1, dn1) = split(hinge_normal(p1, p2, p3));
    let (n2, dn2) = split(hinge_normal(p2, p1, p4));
    if dn1 < DEGENERATE_THRESHOLD || dn2 < DEGENERATE_THRESHOLD {
        return None;
    }
    Some(clamped_acos(n1.dot(n2)))
}

/// Keeps the dihedral angle across edge `v1`–`v2` at its rest value.
#[derive(Debug, Clone, PartialEq)]
pub struct BendingConstraint {
    vertices: [VertexId; 4],
    stiffness: Scalar,
    rest_angle: Scalar,
}

impl BendingConstraint {
    /// Captures the rest angle from committed positions.
    ///
    /// `v1`, `v2` are the shared edge; `v3`, `v4` the apexes. Fails if a
    /// vertex is unknown or either face has zero area at rest.
    pub fn new(
        store: &VertexStore,
        [v1, v2, v3, v4]: [VertexId; 4],
        stiffness: Scalar,
    ) -> DrapeResult<Self> {
        for v in [v1, v2, v3, v4] {
            store.check(v)?;
        }
        let rest_angle = dihedral_angle(
            store[v1].position,
            store[v2].position,
            store[v3].position,
            store[v4].position,
        )
        .ok_or_else(|| {
            DrapeError::InvalidMesh(format!(
                "degenerate hinge [{}, {}, {}, {}]",
                v1.0, v2.0, v3.0, v4.0
            ))
        })?;

        Ok(Self {
            vertices: [v1, v2, v3, v4],
            stiffness,
            rest_angle,
        })
    }

    /// Rest dihedral angle (radians, `0` for a flat hinge).
    pub fn rest_angle(&self) -> Scalar {
        self.rest_angle
    }
}

impl PositionConstraint for BendingConstraint {
    fn arity(&self) -> usize {
        4
    }

    fn stiffness(&self) -> Scalar {
        self.stiffness
    }

    fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    fn solve(&self, store: &mut VertexStore) {
        let [v1, v2, v3, v4] = self.vertices;
        let (p1, w1) = (store[v1].predicted, store[v1].inv_mass);
        let (p2, w2) = (store[v2].predicted, store[v2].inv_mass);
        let (p3, w3) = (store[v3].predicted, store[v3].inv_mass);
        let (p4, w4) = (store[v4].predicted, store[v4].inv_mass);

        let e = p2 - p1;
        let de = e.length();
        let (n1, dn1) = split(hinge_normal(p1, p2, p3));
        let (n2, dn2) = split(hinge_normal(p2, p1, p4));
        if de < DEGENERATE_THRESHOLD || dn1 < DEGENERATE_THRESHOLD || dn2 < DEGENERATE_THRESHOLD {
            return;
        }

        let q1 = ((p3 - p2).dot(e) * n1 / dn1 + (p4 - p2).dot(e) * n2 / dn2) / de;
        let q2 = ((p1 - p3).dot(e) * n1 / dn1 + (p1 - p4).dot(e) * n2 / dn2) / de;
        let q3 = de * n1 / dn1;
        let q4 = de * n2 / dn2;

        let sum = w1 * q1.length_squared()
            + w2 * q2.length_squared()
            + w3 * q3.length_squared()
            + w4 * q4.length_squared();
        if sum < EPSILON {
            return;
        }

        let mut lambda = self.stiffness * (clamped_acos(n1.dot(n2)) - self.rest_angle) / sum;
        if n1.cross(n2).dot(e) > 0.0 {
            lambda = -lambda;
        }

        store[v1].predicted -= w1 * lambda * q1;
        store[v2].predicted -= w2 * lambda * q2;
        store[v3].predicted -= w3 * lambda * q3;
        store[v4].predicted -= w4 * lambda * q4;
    }

    fn violation(&self, store: &VertexStore) -> Scalar {
        let [v1, v2, v3, v4] = self.vertices;
        dihedral_angle(
            store[v1].predicted,
            store[v2].predicted,
            store[v3].predicted,
            store[v4].predicted,
        )
        .map_or(0.0, |angle| angle - self.rest_angle)
    }
}
