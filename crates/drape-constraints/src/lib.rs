//! # drape-constraints
//!
//! Position-based constraint projection for cloth.
//!
//! Each constraint captures its rest state from committed positions when it
//! is built, then repeatedly nudges the *predicted* positions of its
//! vertices during a solve pass. Corrections are written straight into the
//! shared [`VertexStore`](drape_mesh::VertexStore), so a constraint sees the
//! corrections of every constraint before it in the same sweep
//! (Gauss-Seidel). The order of a [`ConstraintSet`] is therefore part of the
//! simulation's observable behaviour.
//!
//! ## Key Types
//!
//! - [`PositionConstraint`]: the two-operation contract (`solve`, `update_velocity`)
//! - [`Constraint`]: closed set of variants stored in one ordered sequence
//! - [`StretchingConstraint`], [`BendingConstraint`], [`CollisionConstraint`]
//! - [`ConstraintSet`]: persistent (stretch/bend) and per-step (collision) pools

pub mod bending;
pub mod collision;
pub mod constraint;
pub mod set;
pub mod stretching;

pub use bending::BendingConstraint;
pub use collision::CollisionConstraint;
pub use constraint::{Constraint, ConstraintKind, PositionConstraint};
pub use set::ConstraintSet;
pub use stretching::StretchingConstraint;
