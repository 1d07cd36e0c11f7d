//! Named, type-aware field access through an entity's schema.
//!
//! Reads resolve a registered field first and fall back to the identity slot,
//! so `"id"` is queryable. Writes coerce the incoming value into the field's
//! declared type before handing it to the field's setter. The identity slot is
//! never writable here: identities are assigned by the repository.

use repokit_foundation::{Error, Result, Type, Value};

use crate::schema::EntitySchema;

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("field name must not be empty"));
    }
    Ok(())
}

/// Returns the declared type of a field.
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty name and `NoSuchField` if the name
/// is neither a registered field nor the identity slot.
pub fn declared_type<E>(schema: &EntitySchema<E>, name: &str) -> Result<Type> {
    validate_name(name)?;
    if let Some(field) = schema.field(name) {
        return Ok(field.ty.clone());
    }
    match schema.identity() {
        Some(slot) if slot.name == name => Ok(slot.repr.as_type()),
        _ => Err(Error::no_such_field(schema.name(), name)),
    }
}

/// Reads a named field.
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty name and `NoSuchField` if the name
/// is neither a registered field nor the identity slot.
pub fn read_field<E>(schema: &EntitySchema<E>, entity: &E, name: &str) -> Result<Value> {
    validate_name(name)?;
    if let Some(field) = schema.field(name) {
        return Ok((field.get)(entity));
    }
    match schema.identity() {
        Some(slot) if slot.name == name => Ok((slot.get)(entity)),
        _ => Err(Error::no_such_field(schema.name(), name)),
    }
}

/// Coerces `value` into the field's declared type and writes it.
///
/// # Errors
///
/// - `InvalidArgument` for an empty name
/// - `NoSuchField` if no field has that name
/// - `UnsupportedConversion` / `ConversionFailed` if coercion fails
/// - `WriteFailed` if the field is read-only, is the identity, or its setter
///   refuses the value
pub fn write_field<E>(schema: &EntitySchema<E>, entity: &mut E, name: &str, value: Value) -> Result<()> {
    validate_name(name)?;

    let Some(field) = schema.field(name) else {
        return Err(match schema.identity() {
            Some(slot) if slot.name == name => {
                Error::write_failed(schema.name(), name, "identity is assigned by the repository")
            }
            _ => Error::no_such_field(schema.name(), name),
        });
    };

    let coerced = field.ty.coerce(value)?;
    let Some(set) = field.set else {
        return Err(Error::write_failed(schema.name(), name, "field is read-only"));
    };

    set(entity, coerced).map_err(|e| Error::write_failed(schema.name(), name, e.to_string()))
}
