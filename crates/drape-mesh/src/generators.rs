//! Procedural sheet generators for tests and demo scenes.
//!
//! Both generators share one index layout: two triangles per quad, wound so
//! every face normal points the same way.

use drape_types::{DrapeResult, Scalar, Vec3};

use crate::mesh::Mesh;

/// Generates a vertical sheet in the XY plane, centered at the origin.
///
/// Row 0 is the top edge (`y = height/2`). Face normals point along `+Z`.
///
/// # Example
/// ```
/// use drape_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
/// assert_eq!(mesh.vertex_count(), 9);
/// assert_eq!(mesh.triangle_count(), 8);
/// ```
pub fn quad_grid(
    cols: usize,
    rows: usize,
    width: Scalar,
    height: Scalar,
    vertex_mass: Scalar,
) -> DrapeResult<Mesh> {
    grid(cols, rows, vertex_mass, |u, v| {
        Vec3::new((u - 0.5) * width, (0.5 - v) * height, 0.0)
    })
}

/// Generates a horizontal sheet in the XZ plane at `y = elevation`.
///
/// Face normals point along `+Y`.
pub fn horizontal_grid(
    cols: usize,
    rows: usize,
    width: Scalar,
    depth: Scalar,
    elevation: Scalar,
    vertex_mass: Scalar,
) -> DrapeResult<Mesh> {
    grid(cols, rows, vertex_mass, |u, v| {
        Vec3::new((u - 0.5) * width, elevation, (v - 0.5) * depth)
    })
}

fn grid(
    cols: usize,
    rows: usize,
    vertex_mass: Scalar,
    place: impl Fn(Scalar, Scalar) -> Vec3,
) -> DrapeResult<Mesh> {
    let verts_x = cols + 1;
    let verts_y = rows + 1;

    let mut positions = Vec::with_capacity(verts_x * verts_y);
    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as Scalar / cols.max(1) as Scalar;
            let v = j as Scalar / rows.max(1) as Scalar;
            positions.push(place(u, v));
        }
    }

    let mut indices = Vec::with_capacity(cols * rows * 6);
    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            indices.extend_from_slice(&[top_left, bot_left, top_right]);
            indices.extend_from_slice(&[top_right, bot_left, bot_right]);
        }
    }

    Mesh::from_positions(&positions, &indices, vertex_mass)
}
