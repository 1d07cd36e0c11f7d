//! Integration tests for Type coercion
//!
//! Tests the conversion rules applied before a field write.

use chrono::NaiveTime;
use repokit_foundation::{EnumType, ErrorKind, Type, Value};

const STATUS: EnumType = EnumType::new("Status", &["ACTIVE", "CLOSED"]);

// =============================================================================
// Passthrough
// =============================================================================

#[test]
fn matching_values_pass_through() {
    assert_eq!(Type::Int.coerce(Value::Int(20_999_999)).unwrap(), Value::Int(20_999_999));
    assert_eq!(Type::Any.coerce(Value::from("x")).unwrap(), Value::from("x"));

    let nine = Value::from(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    assert_eq!(Type::Time.coerce(nine.clone()).unwrap(), nine);
}

#[test]
fn optional_accepts_nil() {
    let ty = Type::option(Type::Double);
    assert_eq!(ty.coerce(Value::Nil).unwrap(), Value::Nil);
    assert_eq!(ty.coerce(Value::from("2.5")).unwrap(), Value::Double(2.5));
}

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn integers_between_widths() {
    assert_eq!(Type::Int.coerce(Value::Long(20_999_999)).unwrap(), Value::Int(20_999_999));
    assert_eq!(Type::Long.coerce(Value::Int(7)).unwrap(), Value::Long(7));
    assert_eq!(Type::Short.coerce(Value::Int(12)).unwrap(), Value::Short(12));
}

#[test]
fn narrowing_overflow_fails() {
    let err = Type::Int.coerce(Value::Long(i64::MAX)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConversionFailed { .. }));
}

#[test]
fn strings_parse_into_numbers() {
    assert_eq!(Type::Int.coerce(Value::from("20999999")).unwrap(), Value::Int(20_999_999));
    assert_eq!(Type::Double.coerce(Value::from("9500.5")).unwrap(), Value::Double(9500.5));
    assert_eq!(Type::Float.coerce(Value::Int(2)).unwrap(), Value::Float(2.0));
}

#[test]
fn anything_becomes_a_string() {
    assert_eq!(Type::String.coerce(Value::Long(10)).unwrap(), Value::from("10"));
    assert_eq!(Type::String.coerce(Value::Bool(false)).unwrap(), Value::from("false"));
}

#[test]
fn whole_doubles_stringify_with_a_fraction() {
    assert_eq!(Type::String.coerce(Value::Double(2.0)).unwrap(), Value::from("2.0"));
    assert_eq!(Type::Double.coerce(Value::Float(1.0)).unwrap(), Value::Double(1.0));
}

#[test]
fn booleans_parse_case_insensitively() {
    assert_eq!(Type::Bool.coerce(Value::from("True")).unwrap(), Value::Bool(true));
    let err = Type::Bool.coerce(Value::Int(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConversionFailed { .. }));
}

#[test]
fn non_boolean_text_is_not_read_as_false() {
    for text in ["yes", "no", "1", ""] {
        let err = Type::Bool.coerce(Value::from(text)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConversionFailed { .. }));
    }
}

#[test]
fn enums_parse_by_symbol() {
    let ty = Type::Enum(STATUS);
    assert_eq!(ty.coerce(Value::from("CLOSED")).unwrap(), STATUS.value("CLOSED").unwrap());
    assert!(ty.coerce(Value::from("closed")).is_err());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn time_has_no_conversion_rule() {
    let err = Type::Time.coerce(Value::from("09:00")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedConversion { .. }));
}

#[test]
fn whole_doubles_do_not_narrow_to_integers() {
    let err = Type::Int.coerce(Value::Double(3.0)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConversionFailed { .. }));
}

#[test]
fn nil_into_required_type_fails() {
    let err = Type::Int.coerce(Value::Nil).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConversionFailed { .. }));
}

#[test]
fn unparsable_text_reports_value_and_target() {
    let err = Type::Int.coerce(Value::from("abc")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("abc"));
    assert!(msg.contains("int"));
}
