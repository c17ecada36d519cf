//! # drape-telemetry
//!
//! Structured per-step events (timing, contacts, sweep residuals, energy)
//! delivered to pluggable sinks through an [`EventBus`].

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
