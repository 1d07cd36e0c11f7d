//! Identity representations.
//!
//! The repository keys every entity by an `i64`. Entities may hold their
//! identity in a narrower integer or as a string; [`IdentityRepr`] names which.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Type;

/// How an entity stores its identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IdentityRepr {
    /// 64-bit integer (canonical).
    Long,
    /// 32-bit integer.
    Int,
    /// 16-bit integer. Readable, but minted identities cannot be written to it.
    Short,
    /// Decimal string.
    String,
}

impl IdentityRepr {
    /// Returns the declared field type backing this representation.
    #[must_use]
    pub const fn as_type(self) -> Type {
        match self {
            Self::Long => Type::Long,
            Self::Int => Type::Int,
            Self::Short => Type::Short,
            Self::String => Type::String,
        }
    }
}

impl fmt::Display for IdentityRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_type(), f)
    }
}

/// Returns true unless `id` is the "not yet assigned" sentinel.
#[must_use]
pub const fn is_assigned(id: Option<i64>) -> bool {
    matches!(id, Some(n) if n != 0)
}
