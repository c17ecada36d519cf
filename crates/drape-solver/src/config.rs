//! Solver configuration.
//!
//! Iteration count, external acceleration, damping and the stiffness of
//! the generated constraint families. Loadable from TOML; every field has
//! a default so partial files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use drape_types::constants::{
    DEFAULT_BEND_STIFFNESS, DEFAULT_ITERATIONS, DEFAULT_STRETCH_STIFFNESS, GRAVITY,
};
use drape_types::{DrapeError, DrapeResult, Scalar, Vec3};

/// Configuration for the PBD solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Gauss-Seidel sweeps per step. Always run to completion.
    pub iterations: u32,

    /// Gravity vector [gx, gy, gz] in m/s².
    pub gravity: [Scalar; 3],

    /// Velocity damping factor (0.0 = none, 1.0 = velocities zeroed).
    pub damping: Scalar,

    /// Stiffness of generated stretching constraints. `<= 0` disables them.
    pub stretch_stiffness: Scalar,

    /// Stiffness of generated bending constraints. `<= 0` disables them.
    pub bend_stiffness: Scalar,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            gravity: [0.0, -GRAVITY, 0.0],
            damping: 0.0,
            stretch_stiffness: DEFAULT_STRETCH_STIFFNESS,
            bend_stiffness: DEFAULT_BEND_STIFFNESS,
        }
    }
}

impl SolverConfig {
    /// Few sweeps, for quick interactive runs.
    pub fn debug() -> Self {
        Self {
            iterations: 4,
            ..Default::default()
        }
    }

    /// Many sweeps and a little damping, for stiff settled drapes.
    pub fn high_quality() -> Self {
        Self {
            iterations: 60,
            damping: 0.01,
            ..Default::default()
        }
    }

    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    /// Rejects values the solver cannot run with.
    pub fn validate(&self) -> DrapeResult<()> {
        if self.iterations == 0 {
            return Err(DrapeError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        if !self.gravity_vector().is_finite() {
            return Err(DrapeError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(DrapeError::InvalidConfig(format!(
                "damping must lie in [0, 1], got {}",
                self.damping
            )));
        }
        if !self.stretch_stiffness.is_finite() || !self.bend_stiffness.is_finite() {
            return Err(DrapeError::InvalidConfig(
                "stiffness values must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> DrapeResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| DrapeError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> DrapeResult<String> {
        toml::to_string(self).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> DrapeResult<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}
