//! The capability an entity type implements to be stored.

use crate::schema::EntitySchema;

/// An entity type the repository can store.
///
/// The repository never inspects an entity directly. Identity and named
/// fields are reached only through the schema returned here, which is built
/// once per [`Repository`](crate::Repository) and kept for its lifetime.
pub trait Entity: Sized + Send + Sync + 'static {
    /// Builds the identity slot and field registry for this type.
    fn schema() -> EntitySchema<Self>;
}
