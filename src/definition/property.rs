//! Property definitions
//!
//! A [`PropertyDefinition`] is the static description of one configurable
//! setting: its syntax (value type and decoder), its default behavior and
//! whether it holds several values.
//!
//! ```
//! use cfgdefn::{PropertyDefinition, DefaultBehavior};
//!
//! let max_request_size = PropertyDefinition::size("max-request-size")
//!     .default_values(["5 mb"])
//!     .description("Largest request accepted from a client");
//!
//! let log_level = PropertyDefinition::enumeration("log-level", ["DEBUG", "INFO", "WARN"])
//!     .multi_valued()
//!     .default_values(["INFO", "WARN"]);
//!
//! assert!(log_level.multi_valued);
//! assert_eq!(max_request_size.default_behavior, DefaultBehavior::defined(["5 mb"]));
//! ```

use serde::{Deserialize, Serialize};

use super::behavior::DefaultBehavior;
use super::syntax::{DurationUnit, PropertySyntax};
use crate::naming;

/// Static description of one property of a managed object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Property name, hyphenated lower case (e.g. `max-request-size`)
    pub name: String,

    /// Value type and decoding rules
    #[serde(flatten)]
    pub syntax: PropertySyntax,

    /// How the default value is computed
    #[serde(default, rename = "default")]
    pub default_behavior: DefaultBehavior,

    /// Whether the property holds a set of values rather than a single one
    #[serde(default)]
    pub multi_valued: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub read_only: bool,

    #[serde(default)]
    pub advanced: bool,
}

impl PropertyDefinition {
    /// Create a property with the given syntax and an undefined default
    pub fn new(name: impl Into<String>, syntax: PropertySyntax) -> Self {
        Self {
            name: name.into(),
            syntax,
            default_behavior: DefaultBehavior::Undefined,
            multi_valued: false,
            description: None,
            read_only: false,
            advanced: false,
        }
    }

    // =========================================================================
    // Syntax-specific constructors
    // =========================================================================

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PropertySyntax::Boolean)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(
            name,
            PropertySyntax::Integer {
                lower: None,
                upper: None,
                allow_unlimited: false,
            },
        )
    }

    pub fn size(name: impl Into<String>) -> Self {
        Self::new(
            name,
            PropertySyntax::Size {
                lower: None,
                upper: None,
                allow_unlimited: false,
            },
        )
    }

    pub fn duration(name: impl Into<String>, base_unit: DurationUnit) -> Self {
        Self::new(
            name,
            PropertySyntax::Duration {
                base_unit,
                lower: None,
                upper: None,
                allow_unlimited: false,
            },
        )
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, PropertySyntax::String { pattern: None })
    }

    /// Create an enumeration property; constants are ordered as declared
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            PropertySyntax::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn dn(name: impl Into<String>) -> Self {
        Self::new(name, PropertySyntax::Dn)
    }

    // =========================================================================
    // Default behavior setters (builder pattern)
    // =========================================================================

    /// Declare explicit default literals
    #[must_use]
    pub fn default_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_behavior = DefaultBehavior::defined(values);
        self
    }

    /// Default to the current value of another property
    #[must_use]
    pub fn alias_of(mut self, property: impl Into<String>) -> Self {
        self.default_behavior = DefaultBehavior::AliasOf {
            property: property.into(),
        };
        self
    }

    /// Inherit the default from a property of the managed object at `path`
    #[must_use]
    pub fn absolute_inherited(mut self, path: impl Into<String>, property: impl Into<String>) -> Self {
        self.default_behavior = DefaultBehavior::AbsoluteInherited {
            path: path.into(),
            property: property.into(),
        };
        self
    }

    /// Inherit the default from an ancestor `offset` levels up
    #[must_use]
    pub fn relative_inherited(mut self, offset: usize, property: impl Into<String>) -> Self {
        self.default_behavior = DefaultBehavior::RelativeInherited {
            offset,
            property: property.into(),
        };
        self
    }

    #[must_use]
    pub fn default_behavior(mut self, behavior: DefaultBehavior) -> Self {
        self.default_behavior = behavior;
        self
    }

    // =========================================================================
    // Other modifiers
    // =========================================================================

    #[must_use]
    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[must_use]
    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }

    /// Set inclusive bounds on an integer, size or duration property.
    ///
    /// Has no effect on other syntaxes.
    #[must_use]
    pub fn bounds(mut self, lower: Option<i64>, upper: Option<i64>) -> Self {
        match &mut self.syntax {
            PropertySyntax::Integer { lower: l, upper: u, .. }
            | PropertySyntax::Size { lower: l, upper: u, .. }
            | PropertySyntax::Duration { lower: l, upper: u, .. } => {
                *l = lower;
                *u = upper;
            }
            _ => {}
        }
        self
    }

    /// Accept `unlimited` on an integer, size or duration property
    #[must_use]
    pub fn allow_unlimited(mut self) -> Self {
        match &mut self.syntax {
            PropertySyntax::Integer { allow_unlimited, .. }
            | PropertySyntax::Size { allow_unlimited, .. }
            | PropertySyntax::Duration { allow_unlimited, .. } => *allow_unlimited = true,
            _ => {}
        }
        self
    }

    /// Constrain a string property with a regex pattern
    #[must_use]
    pub fn pattern(mut self, regex: impl Into<String>) -> Self {
        if let PropertySyntax::String { pattern } = &mut self.syntax {
            *pattern = Some(regex.into());
        }
        self
    }

    // =========================================================================
    // Naming
    // =========================================================================

    /// Name of the accessor exposing this property on its definition
    /// (e.g. `maxRequestSizePropertyDefinition`)
    #[must_use]
    pub fn accessor_name(&self) -> String {
        naming::accessor_for_property(&self.name)
    }

    /// Validate the property declaration
    ///
    /// Does not decode default literals; see
    /// [`DefinitionRegistry::validate_defaults`](crate::DefinitionRegistry::validate_defaults).
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("property name cannot be empty".to_string());
        }
        self.syntax
            .validate()
            .map_err(|e| format!("property '{}': {e}", self.name))
    }
}
