//! Integration tests for Repository
//!
//! Tests save, lookup, scan, update, and delete semantics.

use std::sync::Arc;

use repokit_foundation::{ErrorKind, Value};
use repokit_storage::{DuplicatePolicy, Repository, RepositoryConfig};

use crate::fixtures::Firm;

// =============================================================================
// Save and Lookup
// =============================================================================

#[test]
fn save_then_find_returns_equal_entity() {
    let repo = Repository::<Firm>::new();
    let saved = repo.save(Firm::new("A", 1)).unwrap();
    let id = i64::from(saved.read().id.unwrap());

    let found = repo.find_by_id(id).unwrap();
    assert_eq!(*found.read(), Firm::new("A", 1).with_id(1));
}

#[test]
fn identity_less_saves_receive_distinct_identities() {
    let repo = Repository::<Firm>::new();
    let a = repo.save(Firm::new("A", 1)).unwrap();
    let b = repo.save(Firm::new("B", 2)).unwrap();

    assert_eq!(a.read().id, Some(1));
    assert_eq!(b.read().id, Some(2));
}

#[test]
fn supplied_identity_overwrites_by_default() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();
    repo.save(Firm::new("B", 2)).unwrap();

    repo.save(Firm::new("C", 3).with_id(1)).unwrap();
    assert_eq!(repo.len(), 2);
    assert_eq!(repo.find_by_id(1).unwrap().read().name, "C");

    let d = repo.save(Firm::new("D", 4)).unwrap();
    assert!(d.read().id.unwrap() >= 2);
    assert_eq!(d.read().id, Some(3));
}

#[test]
fn supplied_identity_rejected_under_strict_policy() {
    let repo = Repository::<Firm>::with_config(RepositoryConfig::strict());
    repo.save(Firm::new("A", 1)).unwrap();
    repo.save(Firm::new("B", 2)).unwrap();

    let err = repo.save(Firm::new("C", 3).with_id(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateIdentity { id: 1, .. }));
    assert_eq!(repo.find_by_id(1).unwrap().read().name, "A");
    assert_eq!(repo.len(), 2);
}

#[test]
fn strict_policy_allows_resaving_the_same_handle() {
    let repo = Repository::<Firm>::with_config(
        RepositoryConfig::default().with_duplicate_policy(DuplicatePolicy::Reject),
    );
    let a = repo.save(Firm::new("A", 1)).unwrap();
    a.write().name = "A2".to_string();

    let again = repo.save_shared(Arc::clone(&a)).unwrap();
    assert!(Arc::ptr_eq(&a, &again));
    assert_eq!(repo.len(), 1);
}

#[test]
fn resaving_an_edited_identity_releases_the_old_key() {
    let repo = Repository::<Firm>::new();
    let a = repo.save(Firm::new("A", 1)).unwrap();

    a.write().id = Some(5);
    repo.save_shared(Arc::clone(&a)).unwrap();

    assert_eq!(repo.len(), 1);
    assert!(repo.contains(5));
    assert!(!repo.contains(1));

    assert!(repo.delete(5));
    assert!(repo.is_empty());
}

#[test]
fn initial_sequence_offsets_minting() {
    let repo = Repository::<Firm>::with_config(RepositoryConfig::default().with_initial_sequence(100));
    let a = repo.save(Firm::new("A", 1)).unwrap();
    assert_eq!(a.read().id, Some(101));
}

#[test]
fn find_all_is_a_snapshot() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();
    repo.save(Firm::new("B", 2)).unwrap();

    let snapshot = repo.find_all();
    repo.delete(1);
    assert_eq!(snapshot.len(), 2);
    assert_eq!(repo.find_all().len(), 1);
}

// =============================================================================
// Scans
// =============================================================================

#[test]
fn find_by_field_returns_exact_subset() {
    let repo = Repository::<Firm>::new();
    for (name, cuit) in [("A", 1), ("B", 2), ("A", 3), ("C", 4)] {
        repo.save(Firm::new(name, cuit)).unwrap();
    }

    let mut cuits: Vec<i32> = repo
        .find_by_field("name", "A")
        .unwrap()
        .iter()
        .map(|f| f.read().cuit)
        .collect();
    cuits.sort_unstable();
    assert_eq!(cuits, vec![1, 3]);

    assert!(repo.find_by_field("name", "Z").unwrap().is_empty());
}

#[test]
fn find_by_field_matches_enums_and_nil() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();
    repo.update_field(1, "tier", "GOLD").unwrap();
    repo.save(Firm::new("B", 2)).unwrap();

    let gold = crate::fixtures::TIER.value("GOLD").unwrap();
    assert_eq!(repo.find_by_field("tier", gold).unwrap().len(), 1);
    assert_eq!(repo.find_by_field("rating", Value::Nil).unwrap().len(), 2);
}

#[test]
fn find_by_identity_name() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();
    repo.save(Firm::new("B", 2)).unwrap();

    let found = repo.find_by_field("id", 2).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].read().name, "B");
}

#[test]
fn find_by_missing_field_is_empty() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();
    assert!(repo.find_by_field("logo", "a.png").unwrap().is_empty());
}

// =============================================================================
// Updates
// =============================================================================

#[test]
fn update_cuit_by_name() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("Company 1", 20_300_123)).unwrap();

    assert!(repo.update_field(1, "cuit", 20_999_999).unwrap());
    assert_eq!(repo.find_by_id(1).unwrap().read().cuit, 20_999_999);

    let err = repo.update_field(1, "vat", 1).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoSuchField { .. }));
}

#[test]
fn update_unknown_id_leaves_repository_unchanged() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();

    assert!(!repo.update_field(9, "cuit", 2).unwrap());
    assert_eq!(repo.len(), 1);
    assert_eq!(repo.find_by_id(1).unwrap().read().cuit, 1);
}

#[test]
fn update_with_empty_name_is_invalid_even_for_unknown_id() {
    let repo = Repository::<Firm>::new();
    let err = repo.update_field(9, "", 2).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
}

#[test]
fn update_failure_keeps_old_value() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();

    let err = repo.update_field(1, "cuit", "not a number").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConversionFailed { .. }));
    assert_eq!(repo.find_by_id(1).unwrap().read().cuit, 1);
}

// =============================================================================
// Deletes
// =============================================================================

#[test]
fn delete_returns_true_exactly_once() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();

    assert!(!repo.delete(42));
    assert!(repo.delete(1));
    assert!(!repo.delete(1));
    assert!(repo.find_by_id(1).is_none());
}

#[test]
fn deleted_identities_are_not_reminted() {
    let repo = Repository::<Firm>::new();
    repo.save(Firm::new("A", 1)).unwrap();
    repo.delete(1);

    let b = repo.save(Firm::new("B", 2)).unwrap();
    assert_eq!(b.read().id, Some(2));
}
