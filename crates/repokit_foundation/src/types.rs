//! Declared field types and the coercion rules into them.

use std::fmt;

use crate::error::{Error, Result};
use crate::value::{EnumValue, Value};

/// Declared type of an entity field.
///
/// Every field registered in an entity schema carries one of these. Writes
/// coerce the supplied [`Value`] into it with [`Type::coerce`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// String type.
    String,
    /// Enumeration with a fixed set of symbolic names.
    Enum(EnumType),
    /// Time of day. Readable and comparable, but has no coercion rule.
    Time,
    /// Optional type (value or nil).
    Option(Box<Type>),
    /// Any type (accepts any value).
    Any,
}

/// An enumerated type: a name and its symbolic variant names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    /// Type name, used in messages.
    pub name: &'static str,
    /// Symbolic names, in declaration order.
    pub variants: &'static [&'static str],
}

impl EnumType {
    /// Creates an enumeration descriptor.
    #[must_use]
    pub const fn new(name: &'static str, variants: &'static [&'static str]) -> Self {
        Self { name, variants }
    }

    /// Resolves a symbolic name to this enumeration's canonical variant.
    #[must_use]
    pub fn symbol(&self, name: &str) -> Option<&'static str> {
        self.variants.iter().copied().find(|v| *v == name)
    }

    /// Returns the value for a symbolic name, if it is a variant.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<Value> {
        self.symbol(name)
            .map(|symbol| Value::Enum(EnumValue { ty: *self, symbol }))
    }
}

impl Type {
    /// Creates an optional type.
    #[must_use]
    pub fn option(inner: Type) -> Self {
        Self::Option(Box::new(inner))
    }

    /// Checks if a value type is accepted by this type without conversion.
    ///
    /// Representations must match exactly: `Long` does not accept `Int`.
    #[must_use]
    pub fn accepts(&self, value_type: &Type) -> bool {
        match (self, value_type) {
            (Self::Any, _) => true,
            (Self::Option(_), Self::Nil) => true,
            (Self::Option(inner), other) => inner.accepts(other),
            (expected, actual) => expected == actual,
        }
    }

    /// Coerces `value` into this type.
    ///
    /// Values that already have this representation pass through unchanged.
    /// Anything else is stringified and parsed into the target.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedConversion` if this type has no conversion rule
    /// (`Time`, `Nil`), or `ConversionFailed` if the text does not parse.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        if self.accepts(&value.value_type()) {
            return Ok(value);
        }
        if let Self::Option(inner) = self {
            return inner.coerce(value);
        }
        if value.is_nil() {
            return Err(Error::conversion_failed(&value, self.clone()));
        }

        let text = value.to_string();
        let converted = match self {
            Self::String => Some(Value::from(text)),
            Self::Long => text.parse().ok().map(Value::Long),
            Self::Int => text.parse().ok().map(Value::Int),
            Self::Short => text.parse().ok().map(Value::Short),
            Self::Bool => parse_bool(&text).map(Value::Bool),
            Self::Double => text.parse().ok().map(Value::Double),
            Self::Float => text.parse().ok().map(Value::Float),
            Self::Enum(ty) => ty.value(&text),
            Self::Time | Self::Nil => {
                return Err(Error::unsupported_conversion(&value, self.clone()));
            }
            Self::Option(_) | Self::Any => unreachable!("handled above"),
        };

        converted.ok_or_else(|| Error::conversion_failed(&value, self.clone()))
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Short => write!(f, "short"),
            Self::Int => write!(f, "int"),
            Self::Long => write!(f, "long"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::String => write!(f, "string"),
            Self::Enum(ty) => write!(f, "enum<{}>", ty.name),
            Self::Time => write!(f, "time"),
            Self::Option(t) => write!(f, "option<{t:?}>"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
