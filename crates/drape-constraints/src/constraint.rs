//! The constraint contract and its tagged-variant container.

use drape_mesh::VertexStore;
use drape_types::{Scalar, VertexId};

use crate::bending::BendingConstraint;
use crate::collision::CollisionConstraint;
use crate::stretching::StretchingConstraint;

/// A geometric constraint projected on predicted positions.
///
/// The solver calls these in order:
///
/// ```text
/// for _ in 0..iterations {
///     for c in constraints { c.solve(store) }
/// }
/// // velocities derived from predicted - position
/// for c in constraints { c.update_velocity(store) }
/// ```
pub trait PositionConstraint {
    /// Number of vertices spanned.
    fn arity(&self) -> usize;

    /// Stiffness scaling the correction.
    fn stiffness(&self) -> Scalar;

    /// Referenced vertices, in the order the projection expects.
    fn vertices(&self) -> &[VertexId];

    /// One projection step on `predicted`. Never fails: immovable or
    /// degenerate configurations are left untouched.
    fn solve(&self, store: &mut VertexStore);

    /// Post-convergence velocity correction.
    fn update_velocity(&self, _store: &mut VertexStore) {}

    /// Signed constraint value on predicted positions (zero when satisfied).
    fn violation(&self, store: &VertexStore) -> Scalar;
}

/// Variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Stretching,
    Bending,
    Collision,
}

/// Any constraint the solver can schedule.
#[derive(Debug, Clone)]
pub enum Constraint {
    Stretching(StretchingConstraint),
    Bending(BendingConstraint),
    Collision(CollisionConstraint),
}

impl Constraint {
    /// Returns the variant tag.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::Stretching(_) => ConstraintKind::Stretching,
            Self::Bending(_) => ConstraintKind::Bending,
            Self::Collision(_) => ConstraintKind::Collision,
        }
    }

    fn inner(&self) -> &dyn PositionConstraint {
        match self {
            Self::Stretching(c) => c,
            Self::Bending(c) => c,
            Self::Collision(c) => c,
        }
    }
}

impl PositionConstraint for Constraint {
    fn arity(&self) -> usize {
        self.inner().arity()
    }

    fn stiffness(&self) -> Scalar {
        self.inner().stiffness()
    }

    fn vertices(&self) -> &[VertexId] {
        self.inner().vertices()
    }

    fn solve(&self, store: &mut VertexStore) {
        self.inner().solve(store);
    }

    fn update_velocity(&self, store: &mut VertexStore) {
        self.inner().update_velocity(store);
    }

    fn violation(&self, store: &VertexStore) -> Scalar {
        self.inner().violation(store)
    }
}

impl From<StretchingConstraint> for Constraint {
    fn from(c: StretchingConstraint) -> Self {
        Self::Stretching(c)
    }
}

impl From<BendingConstraint> for Constraint {
    fn from(c: BendingConstraint) -> Self {
        Self::Bending(c)
    }
}

impl From<CollisionConstraint> for Constraint {
    fn from(c: CollisionConstraint) -> Self {
        Self::Collision(c)
    }
}
