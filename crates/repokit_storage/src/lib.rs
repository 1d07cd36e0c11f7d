//! Concurrent in-memory entity repository for repokit.
//!
//! This crate provides:
//! - [`Entity`] - The capability an entity type implements to be stored
//! - [`EntitySchema`] - Identity slot and field-name-to-type registry
//! - [`Sequencer`] - Monotonic identity issuance with reservation
//! - [`Repository`] - Keyed container with CRUD and single-field queries
//! - [`identity`] and [`field`] - Schema-driven identity and field access

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod entity;
pub mod field;
pub mod identity;
mod repository;
mod schema;
mod sequence;

pub use config::{DuplicatePolicy, RepositoryConfig};
pub use entity::Entity;
pub use repository::{Repository, Shared};
pub use schema::{EntitySchema, FieldSchema, Getter, IdentitySlot, Setter};
pub use sequence::Sequencer;
