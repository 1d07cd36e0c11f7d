//! Dynamic values exchanged with entity fields.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::NaiveTime;

use crate::error::{Error, Result};
use crate::types::{EnumType, Type};

/// A field value read from, or written to, an entity.
///
/// Values are cheaply cloneable. Equality compares representation as well as
/// magnitude: `Int(1)` and `Long(1)` are different values.
#[derive(Clone)]
pub enum Value {
    /// The nil value (represents absence).
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 16-bit signed integer.
    Short(i16),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// String value.
    String(Arc<str>),
    /// Variant of an enumerated type.
    Enum(EnumValue),
    /// Time of day.
    Time(NaiveTime),
}

/// A variant of an [`EnumType`], identified by its symbolic name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// The enumeration this variant belongs to.
    pub ty: EnumType,
    /// The variant's symbolic name.
    pub symbol: &'static str,
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Nil => Type::Nil,
            Self::Bool(_) => Type::Bool,
            Self::Short(_) => Type::Short,
            Self::Int(_) => Type::Int,
            Self::Long(_) => Type::Long,
            Self::Float(_) => Type::Float,
            Self::Double(_) => Type::Double,
            Self::String(_) => Type::String,
            Self::Enum(e) => Type::Enum(e.ty),
            Self::Time(_) => Type::Time,
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Attempts to extract any integer representation, widened to `i64`.
    #[must_use]
    pub const fn as_long(&self) -> Option<i64> {
        match self {
            Self::Short(n) => Some(*n as i64),
            Self::Int(n) => Some(*n as i64),
            Self::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract an enum variant's symbolic name.
    #[must_use]
    pub const fn as_enum_symbol(&self) -> Option<&'static str> {
        match self {
            Self::Enum(e) => Some(e.symbol),
            _ => None,
        }
    }

    /// Attempts to extract a time of day.
    #[must_use]
    pub const fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Normalizes an identity value to the canonical `i64`.
    ///
    /// Accepts any integer representation or a string that parses as one.
    /// Every other value, including nil, reads as "no identity".
    #[must_use]
    pub fn as_identity(&self) -> Option<i64> {
        match self {
            Self::String(s) => s.trim().parse().ok(),
            other => other.as_long(),
        }
    }

    /// Extracts a typed Rust value, typically inside a field setter.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the representation does not match `T`.
    pub fn extract<T: FromValue>(self) -> Result<T> {
        T::from_value(self)
    }
}

/// Typed extraction from a [`Value`] of the matching representation.
///
/// Setters receive values that were already coerced to the field's declared
/// type, so extraction never converts; it only unwraps.
pub trait FromValue: Sized {
    /// Unwraps the value.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the representation does not match.
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! from_value_impl {
    ($rust:ty, $variant:ident, $ty:expr) => {
        impl FromValue for $rust {
            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(Error::type_mismatch($ty, other.value_type())),
                }
            }
        }
    };
}

from_value_impl!(bool, Bool, Type::Bool);
from_value_impl!(i16, Short, Type::Short);
from_value_impl!(i32, Int, Type::Int);
from_value_impl!(i64, Long, Type::Long);
from_value_impl!(f32, Float, Type::Float);
from_value_impl!(f64, Double, Type::Double);
from_value_impl!(Arc<str>, String, Type::String);
from_value_impl!(NaiveTime, Time, Type::Time);

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.to_string()),
            other => Err(Error::type_mismatch(Type::String, other.value_type())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        if value.is_nil() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Short(n) => n.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Long(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::Double(n) => n.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::Enum(e) => e.hash(state),
            Self::Time(t) => t.hash(state),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Enum(e) => write!(f, "{}::{}", e.ty.name, e.symbol),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Short(n) => write!(f, "{n}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Long(n) => write!(f, "{n}"),
            // Floating-point text always keeps a fractional part ("2.0"), so it
            // never parses back as an integer.
            Self::Float(n) => write!(f, "{n:?}"),
            Self::Double(n) => write!(f, "{n:?}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Enum(e) => write!(f, "{}", e.symbol),
            Self::Time(t) => write!(f, "{t}"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Self::Short(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Long(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.as_str().into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Self::Time(t)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Self::Enum(e)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}
