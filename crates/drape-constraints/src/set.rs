//! Ordered constraint pools and the Gauss-Seidel sweep.
//!
//! A [`ConstraintSet`] holds two pools:
//!
//! - **persistent**: stretching and bending constraints, built once from
//!   topology; their rest state never changes.
//! - **transient**: collision constraints, cleared by
//!   [`ConstraintSet::begin_step`] and refilled from contact detection.
//!
//! Sweeps visit persistent constraints in insertion order, then transient
//! ones in the order contacts were pushed. Reordering changes results.

use drape_mesh::{Mesh, Topology, VertexStore};
use drape_types::{DrapeResult, Scalar, Vec3, VertexId};

use crate::bending::BendingConstraint;
use crate::collision::CollisionConstraint;
use crate::constraint::{Constraint, ConstraintKind, PositionConstraint};
use crate::stretching::StretchingConstraint;

/// Persistent and per-step constraint pools.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    persistent: Vec<Constraint>,
    transient: Vec<Constraint>,
}

impl ConstraintSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds persistent constraints from mesh topology.
    ///
    /// All stretching constraints come first (one per unique edge), then
    /// all bending constraints (one per interior edge), each in topology
    /// order. A non-positive stiffness skips that family entirely.
    pub fn from_topology(
        mesh: &Mesh,
        topology: &Topology,
        stretch_stiffness: Scalar,
        bend_stiffness: Scalar,
    ) -> DrapeResult<Self> {
        let mut set = Self::new();
        let store = &mesh.vertices;

        if stretch_stiffness > 0.0 {
            set.persistent.reserve(topology.edges.len());
            for &[a, b] in &topology.edges {
                set.push(StretchingConstraint::new(store, a, b, stretch_stiffness)?);
            }
        }

        if bend_stiffness > 0.0 {
            set.persistent.reserve(topology.interior_edges.len());
            for ie in &topology.interior_edges {
                set.push(BendingConstraint::new(store, ie.vertices(), bend_stiffness)?);
            }
        }

        tracing::debug!(
            stretching = set.count(ConstraintKind::Stretching),
            bending = set.count(ConstraintKind::Bending),
            "persistent constraints built"
        );
        Ok(set)
    }

    /// Appends a persistent constraint.
    pub fn push(&mut self, constraint: impl Into<Constraint>) {
        self.persistent.push(constraint.into());
    }

    /// Drops last step's collision constraints.
    pub fn begin_step(&mut self) {
        self.transient.clear();
    }

    /// Appends a collision constraint for this step only.
    pub fn push_contact(
        &mut self,
        store: &VertexStore,
        vertex: VertexId,
        point: Vec3,
        normal: Vec3,
    ) -> DrapeResult<()> {
        let c = CollisionConstraint::new(store, vertex, point, normal)?;
        self.transient.push(c.into());
        Ok(())
    }

    pub fn persistent(&self) -> &[Constraint] {
        &self.persistent
    }

    pub fn transient(&self) -> &[Constraint] {
        &self.transient
    }

    /// All constraints in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.persistent.iter().chain(self.transient.iter())
    }

    pub fn len(&self) -> usize {
        self.persistent.len() + self.transient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of constraints of one kind across both pools.
    pub fn count(&self, kind: ConstraintKind) -> usize {
        self.iter().filter(|c| c.kind() == kind).count()
    }

    /// One Gauss-Seidel sweep: `solve()` on every constraint, in order.
    pub fn sweep(&self, store: &mut VertexStore) {
        for c in self.iter() {
            c.solve(store);
        }
    }

    /// `update_velocity()` once on every constraint, in order.
    pub fn update_velocities(&self, store: &mut VertexStore) {
        for c in self.iter() {
            c.update_velocity(store);
        }
    }

    /// Largest absolute violation over all constraints.
    pub fn max_violation(&self, store: &VertexStore) -> Scalar {
        self.iter()
            .map(|c| c.violation(store).abs())
            .fold(0.0, Scalar::max)
    }
}
