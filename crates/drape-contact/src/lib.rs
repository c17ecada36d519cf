//! # drape-contact
//!
//! Contact detection seam for the solver.
//!
//! A [`ContactQuery`] looks at predicted positions and reports one
//! [`Contact`] (vertex, plane point, outward normal) per vertex that has
//! crossed an obstacle surface. The solver turns each contact into a
//! collision constraint for the current step only.
//!
//! The analytic colliders here ([`GroundPlane`], [`SphereCollider`]) stand
//! in for mesh-vs-mesh detection.

pub mod contact;
pub mod ground_plane;
pub mod query;
pub mod sphere;

pub use contact::Contact;
pub use ground_plane::GroundPlane;
pub use query::{ContactQuery, NullContactQuery};
pub use sphere::SphereCollider;
