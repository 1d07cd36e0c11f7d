//! repokit - Generic in-memory entity repository
//!
//! This crate re-exports all layers of the repokit system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: repokit_demo       - Sample entities, trace drivers, logging setup
//! Layer 1: repokit_storage    - Schemas, identity sequencing, repository
//! Layer 0: repokit_foundation - Core types (Value, Type, Error)
//! ```

pub use repokit_demo as demo;
pub use repokit_foundation as foundation;
pub use repokit_storage as storage;
