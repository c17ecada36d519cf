//! Fixed-iteration Gauss-Seidel PBD solver.
//!
//! One step:
//!
//! 1. predict positions from velocity and gravity
//! 2. drop last step's collision constraints and query every collider
//! 3. run `iterations` sweeps over persistent then collision constraints
//! 4. derive velocity from the position delta
//! 5. apply each constraint's velocity correction once, then damping
//! 6. commit predicted positions

use std::time::Instant;

use drape_constraints::ConstraintSet;
use drape_contact::{Contact, ContactQuery};
use drape_mesh::{Mesh, Topology};
use drape_telemetry::{EventBus, EventKind, SimulationEvent};
use drape_types::{DrapeError, DrapeResult, Scalar};

use crate::config::SolverConfig;
use crate::integration;
use crate::strategy::{SolverStrategy, StepResult};

/// Reference PBD integrator.
pub struct GaussSeidelSolver {
    config: SolverConfig,
    constraints: ConstraintSet,
    colliders: Vec<Box<dyn ContactQuery>>,
    /// Reused per-step contact buffer.
    contacts: Vec<Contact>,
    events: Option<EventBus>,
    timestep: u32,
    sim_time: f64,
    initialized: bool,
}

impl GaussSeidelSolver {
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
            constraints: ConstraintSet::new(),
            colliders: Vec::new(),
            contacts: Vec::new(),
            events: None,
            timestep: 0,
            sim_time: 0.0,
            initialized: false,
        }
    }

    /// Adds an obstacle queried every step, after those already added.
    pub fn add_collider(&mut self, collider: Box<dyn ContactQuery>) {
        self.colliders.push(collider);
    }

    pub fn with_collider(mut self, collider: impl ContactQuery + 'static) -> Self {
        self.add_collider(Box::new(collider));
        self
    }

    /// Routes per-step telemetry to `bus`. Events are flushed at the end of
    /// every step.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn event_bus_mut(&mut self) -> Option<&mut EventBus> {
        self.events.as_mut()
    }

    /// Constraints for the current (or last) step.
    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Completed steps since `init`.
    pub fn timestep(&self) -> u32 {
        self.timestep
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    fn emit(&self, kind: EventKind) {
        if let Some(bus) = &self.events {
            bus.emit(SimulationEvent::new(self.timestep, kind));
        }
    }

    fn tracking_sweeps(&self) -> bool {
        self.events.as_ref().is_some_and(EventBus::is_enabled)
    }

    /// Rebuilds this step's collision constraints from every collider.
    fn generate_contacts(&mut self, mesh: &Mesh) -> DrapeResult<Scalar> {
        self.constraints.begin_step();
        self.contacts.clear();
        for collider in &self.colliders {
            collider.detect(mesh, &mut self.contacts);
        }

        let mut max_penetration: Scalar = 0.0;
        for c in &self.contacts {
            self.constraints
                .push_contact(&mesh.vertices, c.vertex, c.point, c.normal)?;
            max_penetration = max_penetration.max(c.penetration_depth());
        }
        Ok(max_penetration)
    }
}

impl Default for GaussSeidelSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStrategy for GaussSeidelSolver {
    fn init(&mut self, mesh: &Mesh, topology: &Topology, config: &SolverConfig) -> DrapeResult<()> {
        config.validate()?;
        self.constraints = ConstraintSet::from_topology(
            mesh,
            topology,
            config.stretch_stiffness,
            config.bend_stiffness,
        )?;
        self.config = config.clone();
        self.timestep = 0;
        self.sim_time = 0.0;
        self.initialized = true;

        tracing::info!(
            solver = self.name(),
            vertices = mesh.vertex_count(),
            constraints = self.constraints.len(),
            colliders = self.colliders.len(),
            iterations = self.config.iterations,
            "solver initialized"
        );
        Ok(())
    }

    fn step(&mut self, mesh: &mut Mesh, dt: Scalar) -> DrapeResult<StepResult> {
        let start = Instant::now();

        if !self.initialized {
            return Err(DrapeError::InvalidConfig(
                "Solver not initialized. Call init() first.".into(),
            ));
        }
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(DrapeError::InvalidConfig(format!(
                "timestep must be positive and finite, got {dt}"
            )));
        }

        self.emit(EventKind::TimestepBegin {
            sim_time: self.sim_time,
        });

        integration::predict(&mut mesh.vertices, dt, self.config.gravity_vector());

        let max_penetration = self.generate_contacts(mesh)?;
        let contacts = self.constraints.transient().len();
        self.emit(EventKind::ContactDetection {
            contact_count: contacts as u32,
            max_penetration,
        });

        let track = self.tracking_sweeps();
        for iteration in 0..self.config.iterations {
            self.constraints.sweep(&mut mesh.vertices);
            if track {
                let residual = self.constraints.max_violation(&mesh.vertices);
                self.emit(EventKind::SolverIteration { iteration, residual });
            }
        }
        let final_residual = self.constraints.max_violation(&mesh.vertices);

        integration::derive_velocities(&mut mesh.vertices, dt);
        self.constraints.update_velocities(&mut mesh.vertices);
        integration::damp(&mut mesh.vertices, self.config.damping);
        integration::commit(&mut mesh.vertices);

        self.emit(EventKind::Convergence {
            iterations: self.config.iterations,
            final_residual,
        });
        self.emit(EventKind::Energy {
            kinetic: integration::kinetic_energy(&mesh.vertices),
        });

        let wall_time = start.elapsed().as_secs_f64();
        self.emit(EventKind::TimestepEnd { wall_time });
        if let Some(bus) = &mut self.events {
            bus.flush();
        }

        tracing::debug!(
            timestep = self.timestep,
            contacts,
            residual = final_residual,
            "step complete"
        );

        self.timestep += 1;
        self.sim_time += dt;

        Ok(StepResult {
            iterations: self.config.iterations,
            contacts,
            final_residual,
            wall_time,
        })
    }

    fn name(&self) -> &str {
        "gauss_seidel_pbd"
    }
}
