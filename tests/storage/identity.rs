//! Integration tests for identity handling
//!
//! Tests identity representations, the unassigned sentinel, and the sequencer.

use repokit_foundation::{ErrorKind, Value};
use repokit_storage::identity::{read_identity, write_identity};
use repokit_storage::{Entity, Repository, Sequencer};

use crate::fixtures::{Badge, Firm, Memo, Ticket};

// =============================================================================
// Representations
// =============================================================================

#[test]
fn string_identity_is_written_as_decimal() {
    let repo = Repository::<Ticket>::new();
    let saved = repo
        .save(Ticket {
            code: None,
            title: "login broken".to_string(),
        })
        .unwrap();

    assert_eq!(saved.read().code.as_deref(), Some("1"));
    assert!(repo.find_by_id(1).is_some());
}

#[test]
fn string_identity_is_read_back() {
    let repo = Repository::<Ticket>::new();
    repo.save(Ticket {
        code: Some("40".to_string()),
        title: "preset".to_string(),
    })
    .unwrap();

    assert!(repo.contains(40));
    assert_eq!(repo.find_by_field("code", "40").unwrap().len(), 1);
    assert_eq!(repo.sequencer().current(), 40);
}

#[test]
fn unparsable_string_identity_is_minted_over() {
    let repo = Repository::<Ticket>::new();
    let saved = repo
        .save(Ticket {
            code: Some("draft".to_string()),
            title: "t".to_string(),
        })
        .unwrap();
    assert_eq!(saved.read().code.as_deref(), Some("1"));
}

#[test]
fn short_identity_cannot_receive_minted_values() {
    let repo = Repository::<Badge>::new();
    let err = repo.save(Badge { id: None }).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedIdentityType { .. }));
    assert!(repo.is_empty());
}

#[test]
fn short_identity_can_be_supplied() {
    let repo = Repository::<Badge>::new();
    repo.save(Badge { id: Some(7) }).unwrap();
    assert!(repo.contains(7));
}

#[test]
fn int_identity_overflow_fails_to_write() {
    let schema = Firm::schema();
    let mut firm = Firm::new("A", 1);
    let err = write_identity(&schema, &mut firm, i64::from(i32::MAX) + 1).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::WriteFailed { .. }));
    assert_eq!(firm.id, None);
}

#[test]
fn entity_without_identity_slot() {
    let schema = Memo::schema();
    let mut memo = Memo { text: "hi".to_string() };
    assert_eq!(read_identity(&schema, &memo), None);
    assert!(!write_identity(&schema, &mut memo, 5).unwrap());
}

#[test]
fn zero_reads_as_present_but_unassigned() {
    let schema = Firm::schema();
    let firm = Firm::new("A", 1).with_id(0);
    assert_eq!(read_identity(&schema, &firm), Some(0));
    assert!(!repokit_foundation::is_assigned(read_identity(&schema, &firm)));
    assert_eq!((schema.identity().unwrap().get)(&firm), Value::Int(0));
}

// =============================================================================
// Sequencer
// =============================================================================

#[test]
fn sequencer_is_strictly_increasing() {
    let seq = Sequencer::new();
    let ids: Vec<i64> = (0..5).map(|_| seq.next()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn reserve_never_moves_backwards() {
    let seq = Sequencer::starting_at(10);
    assert_eq!(seq.reserve(4), 10);
    assert_eq!(seq.reserve(12), 12);
    assert_eq!(seq.next(), 13);
}
