//! Triangle mesh owning the vertex store.
//!
//! The mesh is the only owner of simulation vertices. Constraints and
//! contact queries refer into it by [`VertexId`].

use drape_types::constants::DEFAULT_THICKNESS;
use drape_types::{DrapeError, DrapeResult, Scalar, TriangleId, Vec3, VertexId};

use crate::store::VertexStore;

/// A triangle mesh: vertex store plus flat index buffer.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Simulation vertices.
    pub vertices: VertexStore,
    /// Triangle indices, stored flat: `[t0v0, t0v1, t0v2, t1v0, ...]`.
    indices: Vec<u32>,
    /// Collision margin kept between this surface and obstacles.
    pub thickness: Scalar,
}

impl Mesh {
    /// Builds a mesh from a populated vertex store and an index buffer.
    ///
    /// Validates the indices and records one incident triangle per vertex.
    pub fn new(vertices: VertexStore, indices: Vec<u32>) -> DrapeResult<Self> {
        let mut mesh = Self {
            vertices,
            indices,
            thickness: DEFAULT_THICKNESS,
        };
        mesh.validate()?;
        mesh.link_faces();
        Ok(mesh)
    }

    /// Builds a mesh from raw positions with uniform per-vertex mass.
    pub fn from_positions(positions: &[Vec3], indices: &[u32], vertex_mass: Scalar) -> DrapeResult<Self> {
        let mut store = VertexStore::with_capacity(positions.len());
        for &p in positions {
            store.push(p, vertex_mass)?;
        }
        Self::new(store, indices.to_vec())
    }

    /// Sets the collision margin.
    pub fn with_thickness(mut self, thickness: Scalar) -> Self {
        self.thickness = thickness;
        self
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flat index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the three vertex ids of triangle `t`, in winding order.
    #[inline]
    pub fn triangle(&self, t: TriangleId) -> [VertexId; 3] {
        let base = t.index() * 3;
        [
            VertexId(self.indices[base]),
            VertexId(self.indices[base + 1]),
            VertexId(self.indices[base + 2]),
        ]
    }

    /// Iterates triangle ids in index-buffer order.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId> {
        (0..self.triangle_count() as u32).map(TriangleId)
    }

    /// Checks index buffer integrity.
    ///
    /// - Index count divisible by 3
    /// - Indices within the vertex store
    /// - No triangle repeats a vertex
    pub fn validate(&self) -> DrapeResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(DrapeError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        let n = self.vertices.len();
        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(DrapeError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in self.triangle_ids() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(DrapeError::InvalidMesh(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t.0, a.0, b.0, c.0
                )));
            }
        }

        Ok(())
    }

    fn link_faces(&mut self) {
        for v in self.vertices.iter_mut() {
            v.face = None;
        }
        for t in 0..self.triangle_count() {
            let tri = TriangleId(t as u32);
            for id in self.triangle(tri) {
                let v = &mut self.vertices[id];
                if v.face.is_none() {
                    v.face = Some(tri);
                }
            }
        }
    }
}
