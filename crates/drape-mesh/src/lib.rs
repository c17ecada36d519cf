//! # drape-mesh
//!
//! Per-vertex simulation state and the triangle mesh that owns it.
//!
//! ## Key Types
//!
//! - [`Vertex`]: committed/predicted position, velocity, mass properties.
//! - [`VertexStore`]: append-only arena addressed by [`VertexId`](drape_types::VertexId).
//! - [`Mesh`]: vertex store plus triangle index buffer.
//! - [`Topology`]: unique edges and interior-edge wings, used to generate
//!   stretching and bending constraints.
//! - Procedural generators for test and demo sheets.

pub mod generators;
pub mod mesh;
pub mod normals;
pub mod store;
pub mod topology;
pub mod vertex;

pub use mesh::Mesh;
pub use store::VertexStore;
pub use topology::{InteriorEdge, Topology};
pub use vertex::Vertex;
