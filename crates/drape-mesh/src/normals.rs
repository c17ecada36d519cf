//! Face and vertex normals from committed positions.

use drape_types::{TriangleId, Vec3, VertexId};

use crate::mesh::Mesh;
use crate::topology::Topology;

/// Unit normal of triangle `t` following its winding. Zero if degenerate.
pub fn face_normal(mesh: &Mesh, t: TriangleId) -> Vec3 {
    let [a, b, c] = mesh.triangle(t);
    let pa = mesh.vertices[a].position;
    let pb = mesh.vertices[b].position;
    let pc = mesh.vertices[c].position;
    (pb - pa).cross(pc - pa).normalize_or_zero()
}

/// Angle-weighted vertex normal.
///
/// Each incident face normal is weighted by the interior angle the face
/// subtends at `v`. Isolated vertices get a zero normal.
pub fn vertex_normal(mesh: &Mesh, topology: &Topology, v: VertexId) -> Vec3 {
    let Some(faces) = topology.vertex_triangles.get(v.index()) else {
        return Vec3::ZERO;
    };

    let p = mesh.vertices[v].position;
    let mut normal = Vec3::ZERO;
    for &t in faces {
        let [a, b, c] = mesh.triangle(t);
        let (o1, o2) = if a == v {
            (b, c)
        } else if b == v {
            (c, a)
        } else {
            (a, b)
        };
        let e1 = (mesh.vertices[o1].position - p).normalize_or_zero();
        let e2 = (mesh.vertices[o2].position - p).normalize_or_zero();
        let angle = e1.dot(e2).clamp(-1.0, 1.0).acos();
        normal += face_normal(mesh, t) * angle;
    }
    normal.normalize_or_zero()
}
