//! Property syntaxes and the value decoder contract
//!
//! Every property definition carries a [`PropertySyntax`] describing how a
//! string literal is decoded into a typed [`PropertyValue`]. Decoding never
//! guesses: a literal that is not valid for the syntax yields a
//! [`DecodeError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::{EnumValue, PropertyValue};

/// Keyword accepted by numeric syntaxes that allow an unlimited value.
pub const UNLIMITED: &str = "unlimited";

/// Failure to decode a literal under a property's syntax
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value '{literal}': {reason}")]
pub struct DecodeError {
    pub literal: String,
    pub reason: String,
}

impl DecodeError {
    pub fn new(literal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            reason: reason.into(),
        }
    }
}

/// Turns string literals into typed values.
///
/// Implemented by [`PropertySyntax`] for the built-in property types. The
/// resolver is generic over this trait so it can be driven by any decoder
/// whose values have a natural ordering.
pub trait ValueDecoder {
    type Value: Ord + Clone;

    /// Decode a single literal
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the literal is not valid for this decoder.
    fn decode(&self, literal: &str) -> Result<Self::Value, DecodeError>;
}

// =============================================================================
// Duration Units
// =============================================================================

/// Unit a duration property's values are expressed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl DurationUnit {
    /// Length of one unit in milliseconds
    #[must_use]
    pub fn millis(self) -> i64 {
        match self {
            DurationUnit::Milliseconds => 1,
            DurationUnit::Seconds => 1_000,
            DurationUnit::Minutes => 60_000,
            DurationUnit::Hours => 3_600_000,
            DurationUnit::Days => 86_400_000,
            DurationUnit::Weeks => 604_800_000,
        }
    }

    /// Parse a unit suffix such as `ms`, `s`, `minutes` or `w`
    pub fn parse(unit: &str) -> Option<Self> {
        let unit = match unit.to_ascii_lowercase().as_str() {
            "ms" | "msec" | "millisecond" | "milliseconds" => DurationUnit::Milliseconds,
            "s" | "sec" | "second" | "seconds" => DurationUnit::Seconds,
            "m" | "min" | "minute" | "minutes" => DurationUnit::Minutes,
            "h" | "hr" | "hour" | "hours" => DurationUnit::Hours,
            "d" | "day" | "days" => DurationUnit::Days,
            "w" | "week" | "weeks" => DurationUnit::Weeks,
            _ => return None,
        };
        Some(unit)
    }

    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            DurationUnit::Milliseconds => "ms",
            DurationUnit::Seconds => "s",
            DurationUnit::Minutes => "m",
            DurationUnit::Hours => "h",
            DurationUnit::Days => "d",
            DurationUnit::Weeks => "w",
        }
    }
}

// =============================================================================
// Property Syntax
// =============================================================================

/// Declared value type of a property, including its decoding rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "syntax", rename_all = "lowercase")]
pub enum PropertySyntax {
    /// `true` or `false`, case-insensitive
    Boolean,
    /// Signed decimal integer with optional inclusive bounds
    Integer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper: Option<i64>,
        #[serde(default)]
        allow_unlimited: bool,
    },
    /// Byte size with an optional unit (`kb`, `mib`, ...)
    Size {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper: Option<i64>,
        #[serde(default)]
        allow_unlimited: bool,
    },
    /// Duration with an optional unit, decoded into `base_unit`
    Duration {
        #[serde(default)]
        base_unit: DurationUnit,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper: Option<i64>,
        #[serde(default)]
        allow_unlimited: bool,
    },
    /// Free-form string, optionally constrained by a regex
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    /// One of a fixed list of constants
    Enum { values: Vec<String> },
    /// LDAP distinguished name
    Dn,
}

impl PropertySyntax {
    /// Short name used in documentation and error messages
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PropertySyntax::Boolean => "boolean",
            PropertySyntax::Integer { .. } => "integer",
            PropertySyntax::Size { .. } => "size",
            PropertySyntax::Duration { .. } => "duration",
            PropertySyntax::String { .. } => "string",
            PropertySyntax::Enum { .. } => "enum",
            PropertySyntax::Dn => "dn",
        }
    }

    /// Validate the syntax declaration itself
    ///
    /// Checks bounds ordering, pattern validity and that enumerations
    /// declare at least one distinct constant.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            PropertySyntax::Integer { lower, upper, allow_unlimited }
            | PropertySyntax::Size { lower, upper, allow_unlimited }
            | PropertySyntax::Duration { lower, upper, allow_unlimited, .. } => {
                if let Some(lower) = lower.filter(|lower| *allow_unlimited && *lower < 0) {
                    return Err(format!(
                        "lower bound ({lower}) cannot be negative when unlimited values are allowed"
                    ));
                }
                if let (Some(lower), Some(upper)) = (lower, upper) {
                    if lower > upper {
                        return Err(format!(
                            "lower bound ({lower}) cannot be greater than upper bound ({upper})"
                        ));
                    }
                }
            }
            PropertySyntax::String {
                pattern: Some(pattern),
            } => {
                regex::Regex::new(pattern).map_err(|e| format!("Invalid regex pattern: {e}"))?;
            }
            PropertySyntax::Enum { values } => {
                if values.is_empty() {
                    return Err("enumeration must declare at least one value".to_string());
                }
                for (i, value) in values.iter().enumerate() {
                    if values[..i].iter().any(|v| v.eq_ignore_ascii_case(value)) {
                        return Err(format!("enumeration value '{value}' is declared twice"));
                    }
                }
            }
            PropertySyntax::Boolean | PropertySyntax::String { pattern: None } | PropertySyntax::Dn => {}
        }
        Ok(())
    }
}

impl ValueDecoder for PropertySyntax {
    type Value = PropertyValue;

    fn decode(&self, literal: &str) -> Result<PropertyValue, DecodeError> {
        match self {
            PropertySyntax::Boolean => decode_boolean(literal),
            PropertySyntax::Integer {
                lower,
                upper,
                allow_unlimited,
            } => {
                let trimmed = literal.trim();
                if trimmed.eq_ignore_ascii_case(UNLIMITED) {
                    return unlimited(literal, *allow_unlimited).map(PropertyValue::Integer);
                }
                let value = trimmed
                    .parse::<i64>()
                    .map_err(|_| DecodeError::new(literal, "not a valid integer"))?;
                // -1 is reserved for unlimited
                if *allow_unlimited && value < 0 {
                    return Err(DecodeError::new(
                        literal,
                        "negative values are not allowed when unlimited is allowed",
                    ));
                }
                check_bounds(literal, value, *lower, *upper).map(PropertyValue::Integer)
            }
            PropertySyntax::Size {
                lower,
                upper,
                allow_unlimited,
            } => {
                if literal.trim().eq_ignore_ascii_case(UNLIMITED) {
                    return unlimited(literal, *allow_unlimited).map(PropertyValue::Size);
                }
                let bytes = decode_size(literal)?;
                check_bounds(literal, bytes, *lower, *upper).map(PropertyValue::Size)
            }
            PropertySyntax::Duration {
                base_unit,
                lower,
                upper,
                allow_unlimited,
            } => {
                if literal.trim().eq_ignore_ascii_case(UNLIMITED) {
                    return unlimited(literal, *allow_unlimited).map(PropertyValue::Duration);
                }
                let value = decode_duration(literal, *base_unit)?;
                check_bounds(literal, value, *lower, *upper).map(PropertyValue::Duration)
            }
            PropertySyntax::String { pattern } => {
                if let Some(pattern) = pattern {
                    let re = regex::Regex::new(pattern)
                        .map_err(|e| DecodeError::new(literal, format!("Invalid regex pattern: {e}")))?;
                    if !re.is_match(literal) {
                        return Err(DecodeError::new(
                            literal,
                            format!("does not match pattern: {pattern}"),
                        ));
                    }
                }
                Ok(PropertyValue::String(literal.to_string()))
            }
            PropertySyntax::Enum { values } => {
                let trimmed = literal.trim();
                values
                    .iter()
                    .position(|v| v.eq_ignore_ascii_case(trimmed))
                    .map(|ordinal| PropertyValue::Enum(EnumValue::new(ordinal, values[ordinal].clone())))
                    .ok_or_else(|| {
                        DecodeError::new(literal, format!("expected one of: {}", values.join(", ")))
                    })
            }
            PropertySyntax::Dn => decode_dn(literal).map(PropertyValue::Dn),
        }
    }
}

// =============================================================================
// Decoding Helpers
// =============================================================================

fn decode_boolean(literal: &str) -> Result<PropertyValue, DecodeError> {
    let trimmed = literal.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(PropertyValue::Boolean(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(PropertyValue::Boolean(false))
    } else {
        Err(DecodeError::new(literal, "expected 'true' or 'false'"))
    }
}

fn unlimited(literal: &str, allowed: bool) -> Result<i64, DecodeError> {
    if allowed {
        Ok(-1)
    } else {
        Err(DecodeError::new(literal, "unlimited values are not allowed"))
    }
}

fn check_bounds(
    literal: &str,
    value: i64,
    lower: Option<i64>,
    upper: Option<i64>,
) -> Result<i64, DecodeError> {
    if let Some(lower) = lower {
        if value < lower {
            return Err(DecodeError::new(literal, format!("must be at least {lower}")));
        }
    }
    if let Some(upper) = upper {
        if value > upper {
            return Err(DecodeError::new(literal, format!("must be at most {upper}")));
        }
    }
    Ok(value)
}

/// Split `"10 mb"` / `"10mb"` into the number and the (possibly empty) unit
fn split_number_unit(literal: &str) -> Result<(i64, &str), DecodeError> {
    let trimmed = literal.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return Err(DecodeError::new(literal, "expected a non-negative number"));
    }
    let number = trimmed[..end]
        .parse::<i64>()
        .map_err(|_| DecodeError::new(literal, "number is out of range"))?;
    Ok((number, trimmed[end..].trim()))
}

fn decode_size(literal: &str) -> Result<i64, DecodeError> {
    let (number, unit) = split_number_unit(literal)?;
    let multiplier: i64 = match unit.to_ascii_lowercase().as_str() {
        "" | "b" | "byte" | "bytes" => 1,
        "kb" => 1_000,
        "kib" => 1 << 10,
        "mb" => 1_000_000,
        "mib" => 1 << 20,
        "gb" => 1_000_000_000,
        "gib" => 1 << 30,
        "tb" => 1_000_000_000_000,
        "tib" => 1 << 40,
        _ => return Err(DecodeError::new(literal, format!("unknown size unit '{unit}'"))),
    };
    number
        .checked_mul(multiplier)
        .ok_or_else(|| DecodeError::new(literal, "size is out of range"))
}

fn decode_duration(literal: &str, base_unit: DurationUnit) -> Result<i64, DecodeError> {
    let (number, unit) = split_number_unit(literal)?;
    if unit.is_empty() {
        return Ok(number);
    }
    let unit = DurationUnit::parse(unit)
        .ok_or_else(|| DecodeError::new(literal, format!("unknown duration unit '{unit}'")))?;
    let millis = number
        .checked_mul(unit.millis())
        .ok_or_else(|| DecodeError::new(literal, "duration is out of range"))?;
    if millis % base_unit.millis() != 0 {
        return Err(DecodeError::new(
            literal,
            format!(
                "not a whole number of {}",
                base_unit.abbreviation()
            ),
        ));
    }
    Ok(millis / base_unit.millis())
}

/// Validate and normalize a distinguished name.
///
/// Components are separated by unescaped commas; unescaped whitespace around
/// each component is dropped and attribute types are lower-cased.
fn decode_dn(literal: &str) -> Result<String, DecodeError> {
    let trimmed = trim_unescaped(literal);
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let mut components = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in trimmed.chars() {
        if escaped {
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            current.push(c);
            escaped = true;
        } else if c == ',' {
            components.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if escaped {
        return Err(DecodeError::new(literal, "dangling escape character"));
    }
    components.push(current);

    let mut normalized = Vec::with_capacity(components.len());
    for component in &components {
        let (attr, value) = component
            .split_once('=')
            .ok_or_else(|| DecodeError::new(literal, format!("'{}' is not an attr=value pair", component.trim())))?;
        let attr = attr.trim();
        let value = trim_unescaped(value);
        let valid_attr = attr
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
            && attr
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if !valid_attr {
            return Err(DecodeError::new(
                literal,
                format!("invalid attribute type '{attr}'"),
            ));
        }
        if value.is_empty() {
            return Err(DecodeError::new(
                literal,
                format!("attribute '{attr}' has an empty value"),
            ));
        }
        normalized.push(format!("{}={}", attr.to_ascii_lowercase(), value));
    }
    Ok(normalized.join(","))
}

/// Trim surrounding whitespace, keeping a trailing space escaped as `\ `
fn trim_unescaped(s: &str) -> &str {
    let mut trimmed = s.trim_start();
    while let Some(rest) = trimmed.strip_suffix(char::is_whitespace) {
        let backslashes = rest.chars().rev().take_while(|c| *c == '\\').count();
        if backslashes % 2 == 1 {
            break;
        }
        trimmed = rest;
    }
    trimmed
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn integer() -> PropertySyntax {
        PropertySyntax::Integer {
            lower: Some(0),
            upper: None,
            allow_unlimited: true,
        }
    }

    #[test]
    fn test_boolean_decoding() {
        assert_eq!(
            PropertySyntax::Boolean.decode("TRUE"),
            Ok(PropertyValue::Boolean(true))
        );
        assert_eq!(
            PropertySyntax::Boolean.decode(" false "),
            Ok(PropertyValue::Boolean(false))
        );
        assert!(PropertySyntax::Boolean.decode("yes").is_err());
    }

    #[test]
    fn test_integer_decoding() {
        let syntax = integer();
        assert_eq!(syntax.decode("5000000"), Ok(PropertyValue::Integer(5_000_000)));
        assert_eq!(syntax.decode("Unlimited"), Ok(PropertyValue::Integer(-1)));

        let err = syntax.decode("-5").unwrap_err();
        assert_eq!(err.reason, "negative values are not allowed when unlimited is allowed");
        assert!(syntax.decode("12abc").is_err());

        let strict = PropertySyntax::Integer {
            lower: None,
            upper: Some(10),
            allow_unlimited: false,
        };
        assert!(strict.decode("unlimited").is_err());
        assert!(strict.decode("11").is_err());
    }

    #[test]
    fn test_unlimited_is_distinct_from_negative_literals() {
        let syntax = PropertySyntax::Integer {
            lower: None,
            upper: None,
            allow_unlimited: true,
        };
        assert_eq!(syntax.decode("unlimited"), Ok(PropertyValue::Integer(-1)));
        assert!(syntax.decode("-1").is_err());

        let signed = PropertySyntax::Integer {
            lower: None,
            upper: None,
            allow_unlimited: false,
        };
        assert_eq!(signed.decode("-1"), Ok(PropertyValue::Integer(-1)));
        assert_eq!(PropertyValue::Integer(-1).to_string(), "-1");

        let negative_floor = PropertySyntax::Integer {
            lower: Some(-10),
            upper: None,
            allow_unlimited: true,
        };
        assert!(negative_floor.validate().is_err());
        assert!(
            PropertySyntax::Integer {
                lower: Some(-10),
                upper: None,
                allow_unlimited: false
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn test_size_decoding() {
        let syntax = PropertySyntax::Size {
            lower: None,
            upper: None,
            allow_unlimited: false,
        };
        assert_eq!(syntax.decode("100"), Ok(PropertyValue::Size(100)));
        assert_eq!(syntax.decode("5 mb"), Ok(PropertyValue::Size(5_000_000)));
        assert_eq!(syntax.decode("2KiB"), Ok(PropertyValue::Size(2048)));
        assert!(syntax.decode("5 parsecs").is_err());
        assert!(syntax.decode("mb").is_err());
    }

    #[test]
    fn test_duration_decoding() {
        let syntax = PropertySyntax::Duration {
            base_unit: DurationUnit::Seconds,
            lower: None,
            upper: None,
            allow_unlimited: true,
        };
        assert_eq!(syntax.decode("30"), Ok(PropertyValue::Duration(30)));
        assert_eq!(syntax.decode("5 minutes"), Ok(PropertyValue::Duration(300)));
        assert_eq!(syntax.decode("2000ms"), Ok(PropertyValue::Duration(2)));
        assert_eq!(syntax.decode("unlimited"), Ok(PropertyValue::Duration(-1)));

        let err = syntax.decode("1500 ms").unwrap_err();
        assert_eq!(err.reason, "not a whole number of s");
    }

    #[test]
    fn test_string_pattern() {
        let syntax = PropertySyntax::String {
            pattern: Some(r"^[a-z]+$".into()),
        };
        assert_eq!(
            syntax.decode("abc"),
            Ok(PropertyValue::String("abc".into()))
        );
        assert!(syntax.decode("ABC").is_err());

        let free = PropertySyntax::String { pattern: None };
        assert_eq!(free.decode(" x "), Ok(PropertyValue::String(" x ".into())));
    }

    #[test]
    fn test_enum_decoding_canonicalizes() {
        let syntax = PropertySyntax::Enum {
            values: vec!["DEBUG".into(), "INFO".into(), "WARN".into()],
        };
        let value = syntax.decode("info").unwrap();
        assert_eq!(value, PropertyValue::Enum(EnumValue::new(1, "INFO")));
        assert_eq!(value.as_str(), Some("INFO"));

        let err = syntax.decode("TRACE").unwrap_err();
        assert_eq!(err.reason, "expected one of: DEBUG, INFO, WARN");
    }

    #[test]
    fn test_dn_decoding() {
        let syntax = PropertySyntax::Dn;
        assert_eq!(
            syntax.decode("CN=Directory Manager , cn=Root DNs,cn=config"),
            Ok(PropertyValue::Dn(
                "cn=Directory Manager,cn=Root DNs,cn=config".into()
            ))
        );
        assert_eq!(
            syntax.decode(r"cn=Smith\, John,dc=example"),
            Ok(PropertyValue::Dn(r"cn=Smith\, John,dc=example".into()))
        );
        assert_eq!(syntax.decode(""), Ok(PropertyValue::Dn(String::new())));
        assert!(syntax.decode(r"cn=a\").is_err());
        assert!(syntax.decode("not a dn").is_err());
        assert!(syntax.decode("cn=").is_err());
    }

    #[test]
    fn test_dn_keeps_escaped_trailing_space() {
        let syntax = PropertySyntax::Dn;
        let decoded = syntax.decode(r"cn=a\ ,dc=x").unwrap();
        assert_eq!(decoded, PropertyValue::Dn(r"cn=a\ ,dc=x".into()));

        // Decoding the normalized form is stable
        let again = syntax.decode(decoded.as_str().unwrap()).unwrap();
        assert_eq!(again, decoded);

        assert_eq!(
            syntax.decode(r" cn=a\  , dc=x\ "),
            Ok(PropertyValue::Dn(r"cn=a\ ,dc=x\ ".into()))
        );
        assert_eq!(
            syntax.decode(r"cn=a\\ ,dc=x"),
            Ok(PropertyValue::Dn(r"cn=a\\,dc=x".into()))
        );
    }

    #[test]
    fn test_syntax_validation() {
        assert!(integer().validate().is_ok());
        assert!(
            PropertySyntax::Integer {
                lower: Some(10),
                upper: Some(1),
                allow_unlimited: false
            }
            .validate()
            .is_err()
        );
        assert!(PropertySyntax::Enum { values: vec![] }.validate().is_err());
        assert!(
            PropertySyntax::Enum {
                values: vec!["a".into(), "A".into()]
            }
            .validate()
            .is_err()
        );
        assert!(
            PropertySyntax::String {
                pattern: Some("(".into())
            }
            .validate()
            .is_err()
        );
    }
}
