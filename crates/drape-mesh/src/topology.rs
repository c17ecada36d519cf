//! Edge topology for constraint generation.
//!
//! Built from the index buffer: unique edges (one stretching constraint
//! each) and interior edges with their two wing vertices (one bending
//! constraint each). Ordering follows the first time each edge is met while
//! walking the index buffer, so the derived constraint order is reproducible.

use std::collections::HashMap;

use drape_types::{TriangleId, VertexId};

use crate::mesh::Mesh;

/// Precomputed edge adjacency of a triangle mesh.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the triangles that contain it.
    pub vertex_triangles: Vec<Vec<TriangleId>>,

    /// Unique edges, oriented as first encountered.
    pub edges: Vec<[VertexId; 2]>,

    /// For each edge, the adjacent triangles (1 on the boundary).
    pub edge_triangles: Vec<Vec<TriangleId>>,

    /// Interior edges shared by exactly two consistently wound triangles.
    pub interior_edges: Vec<InteriorEdge>,
}

/// An interior edge, ordered for the dihedral bending projection.
///
/// ```text
///        v3
///       /  \
///     v1 ── v2
///       \  /
///        v4
/// ```
///
/// `tri_a` is wound `(v1, v2, v3)` and `tri_b` is wound `(v2, v1, v4)`, so
/// both face normals computed by the bending constraint agree with the
/// mesh winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteriorEdge {
    pub v1: VertexId,
    pub v2: VertexId,
    /// Apex of `tri_a`.
    pub v3: VertexId,
    /// Apex of `tri_b`.
    pub v4: VertexId,
    pub tri_a: TriangleId,
    pub tri_b: TriangleId,
}

impl InteriorEdge {
    /// Vertices in bending order `[v1, v2, v3, v4]`.
    pub fn vertices(&self) -> [VertexId; 4] {
        [self.v1, self.v2, self.v3, self.v4]
    }
}

impl Topology {
    /// Build topology from a triangle mesh.
    pub fn build(mesh: &Mesh) -> Self {
        let vertex_count = mesh.vertex_count();

        let mut vertex_triangles: Vec<Vec<TriangleId>> = vec![Vec::new(); vertex_count];
        let mut edge_lookup: HashMap<(VertexId, VertexId), usize> = HashMap::new();
        let mut edges: Vec<[VertexId; 2]> = Vec::new();
        let mut edge_triangles: Vec<Vec<TriangleId>> = Vec::new();

        for t in mesh.triangle_ids() {
            let [a, b, c] = mesh.triangle(t);
            for v in [a, b, c] {
                vertex_triangles[v.index()].push(t);
            }
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                let idx = *edge_lookup.entry(key).or_insert_with(|| {
                    edges.push([v0, v1]);
                    edge_triangles.push(Vec::new());
                    edges.len() - 1
                });
                edge_triangles[idx].push(t);
            }
        }

        let mut interior_edges = Vec::new();
        for (edge, tris) in edges.iter().zip(&edge_triangles) {
            match tris.as_slice() {
                [_] => {}
                [ta, tb] => match orient_interior(mesh, *edge, *ta, *tb) {
                    Some(ie) => interior_edges.push(ie),
                    None => tracing::warn!(
                        v0 = edge[0].0,
                        v1 = edge[1].0,
                        "inconsistent winding across edge; no bending constraint"
                    ),
                },
                _ => tracing::warn!(
                    v0 = edge[0].0,
                    v1 = edge[1].0,
                    triangles = tris.len(),
                    "non-manifold edge; no bending constraint"
                ),
            }
        }

        tracing::debug!(
            vertices = vertex_count,
            edges = edges.len(),
            interior = interior_edges.len(),
            "topology built"
        );

        Self {
            vertex_triangles,
            edges,
            edge_triangles,
            interior_edges,
        }
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() == 1)
            .count()
    }

    /// Returns true if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }
}

/// Orders an edge shared by `ta` and `tb` so that the first triangle walks
/// `v1 -> v2`. Returns `None` if both triangles walk the edge the same way.
fn orient_interior(
    mesh: &Mesh,
    [x, y]: [VertexId; 2],
    ta: TriangleId,
    tb: TriangleId,
) -> Option<InteriorEdge> {
    let (v1, v2, tri_a, tri_b) = match (walks(mesh, ta, x, y), walks(mesh, tb, x, y)) {
        (true, false) => (x, y, ta, tb),
        (false, true) => (x, y, tb, ta),
        _ => return None,
    };
    Some(InteriorEdge {
        v1,
        v2,
        v3: apex(mesh, tri_a, v1, v2),
        v4: apex(mesh, tri_b, v1, v2),
        tri_a,
        tri_b,
    })
}

/// True if triangle `t` contains the directed edge `from -> to`.
fn walks(mesh: &Mesh, t: TriangleId, from: VertexId, to: VertexId) -> bool {
    let [a, b, c] = mesh.triangle(t);
    (a == from && b == to) || (b == from && c == to) || (c == from && a == to)
}

/// The vertex of `t` that is neither `v0` nor `v1`.
fn apex(mesh: &Mesh, t: TriangleId, v0: VertexId, v1: VertexId) -> VertexId {
    let [a, b, c] = mesh.triangle(t);
    if a != v0 && a != v1 {
        a
    } else if b != v0 && b != v1 {
        b
    } else {
        c
    }
}
