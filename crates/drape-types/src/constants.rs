//! Tolerances and simulation defaults.

use crate::scalar::Scalar;

/// Movable-mass threshold. A constraint whose weighted inverse-mass sum
/// falls below this value is treated as immovable and left untouched.
pub const EPSILON: Scalar = 1.0e-6;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: Scalar = 9.81;

/// Default timestep (seconds).
pub const DEFAULT_DT: Scalar = 1.0 / 60.0;

/// Default number of Gauss-Seidel sweeps per timestep.
pub const DEFAULT_ITERATIONS: u32 = 20;

/// Default stretching stiffness.
pub const DEFAULT_STRETCH_STIFFNESS: Scalar = 1.0;

/// Default bending stiffness.
pub const DEFAULT_BEND_STIFFNESS: Scalar = 0.1;

/// Default collision margin (meters) kept between cloth and obstacles.
pub const DEFAULT_THICKNESS: Scalar = 0.005;

/// Length/area threshold below which an edge or face normal is degenerate.
pub const DEGENERATE_THRESHOLD: Scalar = 1.0e-12;
