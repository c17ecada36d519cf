//! Error types for the Drape engine.
//!
//! Constraint projection itself never fails; these errors cover setup,
//! configuration and I/O.

use thiserror::Error;

use crate::ids::VertexId;

/// Unified error type for the Drape engine.
#[derive(Debug, Error)]
pub enum DrapeError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A constraint referenced a vertex that is not in the store.
    #[error("Unknown vertex {id:?} (store holds {len} vertices)")]
    UnknownVertex {
        id: VertexId,
        len: usize,
    },

    /// A mass value is negative, zero or non-finite.
    #[error("Invalid mass: {0}")]
    InvalidMass(String),

    /// A contact (point, normal) cannot form a collision constraint.
    #[error("Invalid contact: {0}")]
    InvalidContact(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, DrapeError>`.
pub type DrapeResult<T> = Result<T, DrapeError>;
