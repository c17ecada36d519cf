//! Explicit integration helpers shared by solver strategies.
//!
//! All functions skip pinned vertices: their `predicted` always equals
//! `position` and their velocity stays zero.

use drape_mesh::VertexStore;
use drape_types::{Scalar, Vec3};

/// `v += g·dt`, then `predicted = position + v·dt`.
pub fn predict(store: &mut VertexStore, dt: Scalar, gravity: Vec3) {
    for v in store.iter_mut() {
        if v.is_pinned() {
            v.predicted = v.position;
            continue;
        }
        v.velocity += gravity * dt;
        v.predicted = v.position + v.velocity * dt;
    }
}

/// `v = (predicted − position) / dt`.
pub fn derive_velocities(store: &mut VertexStore, dt: Scalar) {
    let inv_dt = 1.0 / dt;
    for v in store.iter_mut() {
        v.velocity = if v.is_pinned() {
            Vec3::ZERO
        } else {
            (v.predicted - v.position) * inv_dt
        };
    }
}

/// Scales every velocity by `1 − damping`.
pub fn damp(store: &mut VertexStore, damping: Scalar) {
    if damping <= 0.0 {
        return;
    }
    let factor = (1.0 - damping).max(0.0);
    for v in store.iter_mut() {
        v.velocity *= factor;
    }
}

/// `position = predicted`.
pub fn commit(store: &mut VertexStore) {
    for v in store.iter_mut() {
        v.position = v.predicted;
    }
}

/// Total kinetic energy `Σ ½·m·|v|²` over movable vertices.
pub fn kinetic_energy(store: &VertexStore) -> Scalar {
    store
        .iter()
        .filter(|v| !v.is_pinned())
        .map(|v| 0.5 * v.mass * v.velocity.length_squared())
        .sum()
}
