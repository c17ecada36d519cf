//! Contact query trait.

use drape_mesh::Mesh;

use crate::contact::Contact;

/// Trait for contact producers.
///
/// # Implementations
/// - [`GroundPlane`](crate::GroundPlane): infinite plane
/// - [`SphereCollider`](crate::SphereCollider): analytic sphere
/// - [`NullContactQuery`]: no obstacles
pub trait ContactQuery: Send {
    /// Appends a contact for every movable vertex whose predicted position
    /// lies on the wrong side of the obstacle offset by `mesh.thickness`.
    fn detect(&self, mesh: &Mesh, out: &mut Vec<Contact>);

    /// Returns the query name.
    fn name(&self) -> &str;
}

/// No-op query for collision-free scenes.
pub struct NullContactQuery;

impl ContactQuery for NullContactQuery {
    fn detect(&self, _mesh: &Mesh, _out: &mut Vec<Contact>) {}

    fn name(&self) -> &str {
        "null_contact_query"
    }
}
