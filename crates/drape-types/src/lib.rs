//! # drape-types
//!
//! Shared vocabulary for the Drape cloth engine: identifiers, the error
//! type, tolerances and the scalar/vector aliases every other crate uses.
//!
//! No simulation logic lives here.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{DrapeError, DrapeResult};
pub use ids::{TriangleId, VertexId};
pub use scalar::{Scalar, Vec3};
