//! Simulation event types.
//!
//! Events are small value types emitted by the solver at fixed points in
//! each step.

use serde::{Deserialize, Serialize};

/// A simulation event tagged with the step that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Step started.
    TimestepBegin {
        /// Simulation time at the start of the step (seconds).
        sim_time: f64,
    },

    /// Contact detection completed; collision constraints were generated.
    ContactDetection {
        /// Number of collision constraints for this step.
        contact_count: u32,
        /// Deepest penetration among them (meters).
        max_penetration: f64,
    },

    /// One Gauss-Seidel sweep completed.
    SolverIteration {
        /// Sweep number within the step.
        iteration: u32,
        /// Largest absolute constraint violation after the sweep.
        residual: f64,
    },

    /// Kinetic energy after velocities were committed.
    Energy {
        /// 0.5 * m * v^2 summed over movable vertices.
        kinetic: f64,
    },

    /// Sweep summary for the step.
    Convergence {
        iterations: u32,
        final_residual: f64,
    },

    /// Step completed.
    TimestepEnd {
        /// Wall-clock time for the whole step (seconds).
        wall_time: f64,
    },
}

impl SimulationEvent {
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }
}
