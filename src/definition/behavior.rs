//! Default behavior descriptors
//!
//! A property declares how its value is computed when it is never set
//! explicitly. Only [`DefaultBehavior::Defined`] can be resolved from static
//! metadata; the other variants depend on live configuration state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule for computing a property's value when it is not set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DefaultBehavior {
    /// Explicit default literals, decoded with the property's syntax
    Defined { values: Vec<String> },
    /// Default equals the current value of another property
    AliasOf { property: String },
    /// Default inherited from a property of the managed object at `path`
    AbsoluteInherited { path: String, property: String },
    /// Default inherited from an ancestor `offset` levels up the containment tree
    RelativeInherited { offset: usize, property: String },
    /// No default is specified
    #[default]
    Undefined,
}

impl DefaultBehavior {
    /// Create a defined behavior from a list of literals
    pub fn defined<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DefaultBehavior::Defined {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this behavior can be resolved without live configuration
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self, DefaultBehavior::Defined { .. })
    }

    /// Human-readable description of this behavior
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            DefaultBehavior::Defined { values } if values.is_empty() => "none".to_string(),
            DefaultBehavior::Defined { values } => values.join(", "),
            DefaultBehavior::AliasOf { property } => format!("alias of {property}"),
            DefaultBehavior::AbsoluteInherited { path, property } => {
                format!("inherited from {property} of {path}")
            }
            DefaultBehavior::RelativeInherited { offset, property } => {
                format!("inherited from parent (offset {offset}) property {property}")
            }
            DefaultBehavior::Undefined => "none".to_string(),
        }
    }
}

/// Default behaviors that cannot be resolved from static metadata alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedKind {
    Undefined,
    Alias { property: String },
    AbsoluteInherited { path: String, property: String },
    RelativeInherited { offset: usize, property: String },
}

impl fmt::Display for UnresolvedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedKind::Undefined => write!(f, "no default behavior is defined"),
            UnresolvedKind::Alias { property } => {
                write!(f, "default is an alias of property '{property}'")
            }
            UnresolvedKind::AbsoluteInherited { path, property } => {
                write!(f, "default is inherited from '{property}' of '{path}'")
            }
            UnresolvedKind::RelativeInherited { offset, property } => write!(
                f,
                "default is inherited from '{property}' of the ancestor at offset {offset}"
            ),
        }
    }
}
