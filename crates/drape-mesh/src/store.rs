//! Append-only vertex arena.
//!
//! Vertices are never removed, so a `VertexId` handed out by [`VertexStore::push`]
//! stays valid for the store's lifetime even when the backing `Vec` grows.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use drape_types::{DrapeError, DrapeResult, Scalar, Vec3, VertexId};

use crate::vertex::Vertex;

/// Contiguous vertex storage addressed by [`VertexId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexStore {
    vertices: Vec<Vertex>,
}

impl VertexStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Appends a vertex at rest and returns its id.
    pub fn push(&mut self, position: Vec3, mass: Scalar) -> DrapeResult<VertexId> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(DrapeError::InvalidMass(format!(
                "vertex {} has mass {mass}; expected a positive finite value",
                self.vertices.len()
            )));
        }
        if !position.is_finite() {
            return Err(DrapeError::InvalidMesh(format!(
                "vertex {} has non-finite position {position}",
                self.vertices.len()
            )));
        }
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex::new(id, position, mass));
        Ok(id)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the store holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if `id` addresses a vertex in this store.
    #[inline]
    pub fn contains(&self, id: VertexId) -> bool {
        id.index() < self.vertices.len()
    }

    /// Fails with [`DrapeError::UnknownVertex`] if `id` is out of range.
    pub fn check(&self, id: VertexId) -> DrapeResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(DrapeError::UnknownVertex {
                id,
                len: self.vertices.len(),
            })
        }
    }

    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn get_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.index())
    }

    /// Pins vertex `id` (infinite mass).
    pub fn pin(&mut self, id: VertexId) -> DrapeResult<()> {
        self.check(id)?;
        self.vertices[id.index()].pin();
        Ok(())
    }

    /// Unpins vertex `id`.
    pub fn unpin(&mut self, id: VertexId) -> DrapeResult<()> {
        self.check(id)?;
        self.vertices[id.index()].unpin();
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Vertex> {
        self.vertices.iter_mut()
    }

    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Committed positions in id order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }
}

impl Index<VertexId> for VertexStore {
    type Output = Vertex;

    #[inline]
    fn index(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }
}

impl IndexMut<VertexId> for VertexStore {
    #[inline]
    fn index_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }
}

impl<'a> IntoIterator for &'a VertexStore {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}
