//! Typed property values
//!
//! A [`PropertyValue`] is what a [`PropertySyntax`](super::PropertySyntax)
//! decodes a literal into. All values of a single property share one variant,
//! so the derived ordering is the natural ordering of the property's type.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// Value of an enumeration constant.
///
/// Ordered by declaration position (ordinal) rather than by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumValue {
    pub ordinal: usize,
    pub name: String,
}

impl EnumValue {
    pub fn new(ordinal: usize, name: impl Into<String>) -> Self {
        Self {
            ordinal,
            name: name.into(),
        }
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal
    }
}

impl Eq for EnumValue {}

impl PartialOrd for EnumValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnumValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal.cmp(&other.ordinal)
    }
}

/// A decoded property value
///
/// `Integer`, `Size` and `Duration` use `-1` for "unlimited". Sizes and
/// durations are never negative otherwise; integer syntaxes that allow
/// unlimited reject negative literals, so `-1` is unambiguous there too.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    /// Size in bytes
    Size(i64),
    /// Duration expressed in the property's base unit
    Duration(i64),
    String(String),
    Enum(EnumValue),
    Dn(String),
}

impl PropertyValue {
    /// Short name of the variant, used in type mismatch errors
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Size(_) => "size",
            PropertyValue::Duration(_) => "duration",
            PropertyValue::String(_) => "string",
            PropertyValue::Enum(_) => "enum",
            PropertyValue::Dn(_) => "dn",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric payload of integer, size and duration values
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(n) | PropertyValue::Size(n) | PropertyValue::Duration(n) => {
                Some(*n)
            }
            _ => None,
        }
    }

    /// String payload of string and DN values, or the enum constant name
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) | PropertyValue::Dn(s) => Some(s),
            PropertyValue::Enum(e) => Some(&e.name),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            PropertyValue::Enum(e) => Some(e),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::TypeMismatch {
            key: self.to_string(),
            expected: expected.to_string(),
            actual: self.type_name().to_string(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{b}"),
            PropertyValue::Size(-1) | PropertyValue::Duration(-1) => write!(f, "unlimited"),
            PropertyValue::Integer(n) => write!(f, "{n}"),
            PropertyValue::Size(n) => write!(f, "{n} b"),
            PropertyValue::Duration(n) => write!(f, "{n}"),
            PropertyValue::String(s) | PropertyValue::Dn(s) => write!(f, "{s}"),
            PropertyValue::Enum(e) => write!(f, "{}", e.name),
        }
    }
}

impl TryFrom<PropertyValue> for bool {
    type Error = Error;

    fn try_from(value: PropertyValue) -> Result<Self> {
        value.as_bool().ok_or_else(|| value.mismatch("boolean"))
    }
}

impl TryFrom<PropertyValue> for i64 {
    type Error = Error;

    fn try_from(value: PropertyValue) -> Result<Self> {
        value.as_integer().ok_or_else(|| value.mismatch("integer"))
    }
}

impl TryFrom<PropertyValue> for String {
    type Error = Error;

    fn try_from(value: PropertyValue) -> Result<Self> {
        match value {
            PropertyValue::String(s) | PropertyValue::Dn(s) => Ok(s),
            PropertyValue::Enum(e) => Ok(e.name),
            other => Err(other.mismatch("string")),
        }
    }
}
