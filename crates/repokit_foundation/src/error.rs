//! Error types for repokit.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Not-found conditions are never errors: lookups return `Option`/`bool`.

use std::fmt;

use thiserror::Error;

use crate::identity::IdentityRepr;
use crate::types::Type;
use crate::value::Value;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for repository operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn no_such_field(entity: &str, field: &str) -> Self {
        Self::new(ErrorKind::NoSuchField {
            entity: entity.to_string(),
            field: field.to_string(),
        })
    }

    /// Creates an unsupported identity representation error.
    #[must_use]
    pub fn unsupported_identity_type(entity: &str, repr: IdentityRepr) -> Self {
        Self::new(ErrorKind::UnsupportedIdentityType {
            entity: entity.to_string(),
            repr,
        })
    }

    /// Creates an error for a target type with no conversion rule.
    #[must_use]
    pub fn unsupported_conversion(value: &Value, target: Type) -> Self {
        Self::new(ErrorKind::UnsupportedConversion {
            value: value.to_string(),
            target,
        })
    }

    /// Creates an error for a value that could not be parsed into its target.
    #[must_use]
    pub fn conversion_failed(value: &Value, target: Type) -> Self {
        Self::new(ErrorKind::ConversionFailed {
            value: value.to_string(),
            target,
        })
    }

    /// Creates a field write failure.
    #[must_use]
    pub fn write_failed(entity: &str, field: &str, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::WriteFailed {
            entity: entity.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        })
    }

    /// Creates a duplicate identity error.
    #[must_use]
    pub fn duplicate_identity(entity: &str, id: i64) -> Self {
        Self::new(ErrorKind::DuplicateIdentity {
            entity: entity.to_string(),
            id,
        })
    }

    /// Creates a type mismatch error for a typed field extraction.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An argument was absent or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The field name resolves to nothing in the entity's schema.
    #[error("no field '{field}' on {entity}")]
    NoSuchField {
        /// The entity type that was queried.
        entity: String,
        /// The field name that was not found.
        field: String,
    },

    /// The identity slot's representation cannot receive a minted identity.
    #[error("unsupported identity type {repr} on {entity}")]
    UnsupportedIdentityType {
        /// The entity type whose identity could not be written.
        entity: String,
        /// The declared identity representation.
        repr: IdentityRepr,
    },

    /// The target type has no conversion rule.
    #[error("cannot convert '{value}' to {target}: no conversion rule")]
    UnsupportedConversion {
        /// The stringified source value.
        value: String,
        /// The declared target type.
        target: Type,
    },

    /// The value could not be parsed into the target type.
    #[error("cannot convert '{value}' to {target}")]
    ConversionFailed {
        /// The stringified source value.
        value: String,
        /// The declared target type.
        target: Type,
    },

    /// Neither the setter nor the slot accepted the value.
    #[error("could not set '{field}' on {entity}: {reason}")]
    WriteFailed {
        /// The entity type being written.
        entity: String,
        /// The field being written.
        field: String,
        /// Why the write was refused.
        reason: String,
    },

    /// A supplied identity is already held by a different entity.
    #[error("identity {id} already held by another {entity}")]
    DuplicateIdentity {
        /// The entity type being saved.
        entity: String,
        /// The conflicting identity.
        id: i64,
    },

    /// A value did not have the representation a typed extraction expected.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Entity type name.
    pub entity: Option<String>,
    /// Repository operation (`save`, `update_field`, ...).
    pub operation: Option<String>,
    /// Identity of the entity involved, if known.
    pub id: Option<i64>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entity type name.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the identity involved.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " on {entity}")?;
            if let Some(id) = self.id {
                write!(f, "#{id}")?;
            }
        }
        Ok(())
    }
}
