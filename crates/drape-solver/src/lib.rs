//! # drape-solver
//!
//! Time integration around the constraint core.
//!
//! ## Key Types
//!
//! - [`SolverStrategy`]: pluggable step driver (`init` once, `step` per frame)
//! - [`GaussSeidelSolver`]: fixed-iteration PBD loop over a [`ConstraintSet`](drape_constraints::ConstraintSet)
//! - [`SolverConfig`]: iterations, gravity, damping, stiffness
//! - [`SceneConfig`]: TOML-loadable hanging-sheet scene
//! - [`integration`]: predict / derive velocity / commit helpers

pub mod config;
pub mod gauss_seidel;
pub mod integration;
pub mod scene;
pub mod strategy;

pub use config::SolverConfig;
pub use gauss_seidel::GaussSeidelSolver;
pub use scene::{ClothConfig, PinMode, SceneConfig};
pub use strategy::{SolverStrategy, StepResult};
