//! Integration tests for Layer 1: Storage
//!
//! Tests for the repository, identity sequencing, and schema-driven field access.

mod identity;
mod repository;
