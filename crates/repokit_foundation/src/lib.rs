//! Core values, declared types, coercion rules, and errors for repokit.
//!
//! This crate provides:
//! - [`Value`] - The dynamic value exchanged with entity fields
//! - [`Type`] - Declared field types and the coercion rules into them
//! - [`IdentityRepr`] - The representations an entity identity may take
//! - [`Error`] - Error taxonomy with optional context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod identity;
mod types;
mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use identity::{IdentityRepr, is_assigned};
pub use types::{EnumType, Type};
pub use value::{EnumValue, FromValue, Value};
