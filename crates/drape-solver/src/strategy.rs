//! Solver strategy trait.

use drape_mesh::{Mesh, Topology};
use drape_types::{DrapeResult, Scalar};

use crate::config::SolverConfig;

/// Result of a solver step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Sweeps performed (always the configured count).
    pub iterations: u32,
    /// Collision constraints generated for this step.
    pub contacts: usize,
    /// Largest absolute constraint violation after the last sweep.
    pub final_residual: Scalar,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for time integration solvers.
///
/// ```text
/// solver.init(&mesh, &topology, &config)?;
/// loop {
///     solver.step(&mut mesh, dt)?;
/// }
/// ```
pub trait SolverStrategy: Send {
    /// Builds rest-state data from committed positions.
    ///
    /// Called once, or again after pinning or topology changes.
    fn init(&mut self, mesh: &Mesh, topology: &Topology, config: &SolverConfig) -> DrapeResult<()>;

    /// Advances `mesh` by one timestep.
    fn step(&mut self, mesh: &mut Mesh, dt: Scalar) -> DrapeResult<StepResult>;

    fn name(&self) -> &str;
}
