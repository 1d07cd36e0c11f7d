//! Schema definitions for entity types.
//!
//! A schema declares how the repository reaches into an entity: where its
//! identity lives and which named fields it exposes, each with a declared
//! [`Type`] that incoming values are coerced into.

use std::fmt;

use repokit_foundation::{IdentityRepr, Result, Type, Value};

/// Reads a field from an entity.
pub type Getter<E> = fn(&E) -> Value;

/// Writes an already-coerced value into an entity.
pub type Setter<E> = fn(&mut E, Value) -> Result<()>;

/// Schema definition for an entity type.
pub struct EntitySchema<E> {
    /// Entity type name, used in errors and logs.
    name: &'static str,
    /// Where the identity lives, if the entity has one.
    identity: Option<IdentitySlot<E>>,
    /// Field definitions, in declaration order.
    fields: Vec<FieldSchema<E>>,
}

impl<E> EntitySchema<E> {
    /// Creates a schema with no identity and no fields.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            identity: None,
            fields: Vec::new(),
        }
    }

    /// Sets the identity slot.
    #[must_use]
    pub fn with_identity(mut self, slot: IdentitySlot<E>) -> Self {
        self.identity = Some(slot);
        self
    }

    /// Adds a field to the schema.
    #[must_use]
    pub fn with_field(mut self, field: FieldSchema<E>) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the entity type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the identity slot, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&IdentitySlot<E>> {
        self.identity.as_ref()
    }

    /// Returns the field schema by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema<E>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns all registered fields.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema<E>] {
        &self.fields
    }
}

impl<E> fmt::Debug for EntitySchema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySchema")
            .field("name", &self.name)
            .field("identity", &self.identity)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Where an entity keeps its identity, and in which representation.
pub struct IdentitySlot<E> {
    /// Field name of the identity (readable through field access).
    pub name: &'static str,
    /// Declared representation.
    pub repr: IdentityRepr,
    /// Reads the raw identity value.
    pub get: Getter<E>,
    /// Writes an identity value already converted to `repr`.
    pub set: Setter<E>,
}

impl<E> IdentitySlot<E> {
    /// Creates an identity slot named `id`.
    #[must_use]
    pub fn new(repr: IdentityRepr, get: Getter<E>, set: Setter<E>) -> Self {
        Self::named("id", repr, get, set)
    }

    /// Creates an identity slot with an explicit field name.
    #[must_use]
    pub fn named(name: &'static str, repr: IdentityRepr, get: Getter<E>, set: Setter<E>) -> Self {
        Self {
            name,
            repr,
            get,
            set,
        }
    }
}

impl<E> fmt::Debug for IdentitySlot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentitySlot")
            .field("name", &self.name)
            .field("repr", &self.repr)
            .finish_non_exhaustive()
    }
}

/// Schema definition for an entity field.
pub struct FieldSchema<E> {
    /// Field name.
    pub name: &'static str,
    /// Declared type; writes are coerced into it.
    pub ty: Type,
    /// Reads the field.
    pub get: Getter<E>,
    /// Writes the field. `None` makes the field read-only.
    pub set: Option<Setter<E>>,
}

impl<E> FieldSchema<E> {
    /// Creates a readable and writable field.
    #[must_use]
    pub fn new(name: &'static str, ty: Type, get: Getter<E>, set: Setter<E>) -> Self {
        Self {
            name,
            ty,
            get,
            set: Some(set),
        }
    }

    /// Creates a field that can be read and queried but not updated.
    #[must_use]
    pub fn read_only(name: &'static str, ty: Type, get: Getter<E>) -> Self {
        Self {
            name,
            ty,
            get,
            set: None,
        }
    }

    /// Returns true if the field has a setter.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.set.is_some()
    }
}

impl<E> fmt::Debug for FieldSchema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("writable", &self.is_writable())
            .finish_non_exhaustive()
    }
}
