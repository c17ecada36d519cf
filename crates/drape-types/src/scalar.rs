//! Scalar and vector aliases.
//!
//! The constraint projections compare dot products against `±1` and divide
//! by small face-normal magnitudes, so the whole stack runs in `f64`.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;

/// 3D vector type (double precision).
pub type Vec3 = glam::DVec3;
