//! Integration tests for Value
//!
//! Tests construction, equality, typed extraction, and identity normalization.

use std::collections::HashSet;

use chrono::NaiveTime;
use repokit_foundation::{EnumType, ErrorKind, Type, Value};

const SIZE: EnumType = EnumType::new("Size", &["SMALL", "LARGE"]);

// =============================================================================
// Construction and Types
// =============================================================================

#[test]
fn from_rust_primitives() {
    assert_eq!(Value::from(true).value_type(), Type::Bool);
    assert_eq!(Value::from(7_i16).value_type(), Type::Short);
    assert_eq!(Value::from(7_i32).value_type(), Type::Int);
    assert_eq!(Value::from(7_i64).value_type(), Type::Long);
    assert_eq!(Value::from(1.5_f32).value_type(), Type::Float);
    assert_eq!(Value::from(1.5_f64).value_type(), Type::Double);
    assert_eq!(Value::from("text").value_type(), Type::String);
}

#[test]
fn from_option() {
    assert_eq!(Value::from(None::<i32>), Value::Nil);
    assert_eq!(Value::from(Some(3_i32)), Value::Int(3));
}

#[test]
fn enum_values_carry_their_type() {
    let large = SIZE.value("LARGE").unwrap();
    assert_eq!(large.value_type(), Type::Enum(SIZE));
    assert_eq!(large.as_enum_symbol(), Some("LARGE"));
    assert!(SIZE.value("MEDIUM").is_none());
}

#[test]
fn time_values() {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let v = Value::from(nine);
    assert_eq!(v.as_time(), Some(nine));
    assert_eq!(v.to_string(), "09:00:00");
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn equality_is_representation_sensitive() {
    assert_ne!(Value::Int(1), Value::Long(1));
    assert_ne!(Value::Short(1), Value::Int(1));
    assert_ne!(Value::from("1"), Value::Long(1));
    assert_eq!(Value::from("Company 1"), Value::from(String::from("Company 1")));
}

#[test]
fn values_hash_consistently() {
    let set: HashSet<Value> = [Value::Long(1), Value::Long(1), Value::Int(1), Value::Double(0.5)]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 3);
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn extract_matching_representation() {
    assert_eq!(Value::Int(5).extract::<i32>().unwrap(), 5);
    assert_eq!(Value::from("x").extract::<String>().unwrap(), "x");
    assert_eq!(Value::Nil.extract::<Option<i64>>().unwrap(), None);
    assert_eq!(Value::Long(9).extract::<Option<i64>>().unwrap(), Some(9));
}

#[test]
fn extract_never_converts() {
    let err = Value::Long(5).extract::<i32>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

// =============================================================================
// Identity Normalization
// =============================================================================

#[test]
fn identity_from_integers_and_strings() {
    assert_eq!(Value::Short(3).as_identity(), Some(3));
    assert_eq!(Value::Int(4).as_identity(), Some(4));
    assert_eq!(Value::Long(5).as_identity(), Some(5));
    assert_eq!(Value::from(" 42 ").as_identity(), Some(42));
}

#[test]
fn identity_absent_for_other_values() {
    assert_eq!(Value::Nil.as_identity(), None);
    assert_eq!(Value::from("abc").as_identity(), None);
    assert_eq!(Value::Double(1.0).as_identity(), None);
    assert_eq!(Value::Bool(true).as_identity(), None);
}
