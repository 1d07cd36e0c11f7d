//! Reading and writing an entity's identity through its schema.
//!
//! Identities are canonical `i64` inside the repository. On the way in, any
//! integer representation or integer-parseable string is accepted; anything
//! else reads as "absent". On the way out, the minted value is converted to the
//! slot's declared [`IdentityRepr`].

use repokit_foundation::{Error, IdentityRepr, Result, Value};

use crate::schema::EntitySchema;

/// Reads the entity's identity, normalized to `i64`.
///
/// Returns `None` when the schema has no identity slot or the slot holds a
/// value that is not an integer. `Some(0)` is returned as-is; callers treat
/// it as unassigned.
pub fn read_identity<E>(schema: &EntitySchema<E>, entity: &E) -> Option<i64> {
    schema
        .identity()
        .and_then(|slot| (slot.get)(entity).as_identity())
}

/// Writes `id` into the entity's identity slot.
///
/// Returns `Ok(false)` when the schema has no identity slot, in which case the
/// entity is left untouched.
///
/// # Errors
///
/// Returns `UnsupportedIdentityType` for a `Short` slot, and `WriteFailed` if
/// `id` does not fit an `Int` slot or the slot's setter refuses the value.
pub fn write_identity<E>(schema: &EntitySchema<E>, entity: &mut E, id: i64) -> Result<bool> {
    let Some(slot) = schema.identity() else {
        return Ok(false);
    };

    let value = match slot.repr {
        IdentityRepr::Long => Value::Long(id),
        IdentityRepr::Int => Value::Int(i32::try_from(id).map_err(|_| {
            Error::write_failed(schema.name(), slot.name, format!("{id} does not fit in int"))
        })?),
        IdentityRepr::String => Value::from(id.to_string()),
        IdentityRepr::Short => {
            return Err(Error::unsupported_identity_type(schema.name(), slot.repr));
        }
    };

    (slot.set)(entity, value)
        .map_err(|e| Error::write_failed(schema.name(), slot.name, e.to_string()))?;
    Ok(true)
}
