//! Error types for cfgdefn library

use std::path::PathBuf;
use thiserror::Error;

use crate::definition::UnresolvedKind;

/// Result type alias for cfgdefn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a property has no statically resolvable default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoDefaultReason {
    /// The default behavior cannot be followed without live configuration state.
    Unresolved(UnresolvedKind),
    /// Defined behavior with no literals on a single-valued property.
    Empty,
}

impl std::fmt::Display for NoDefaultReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoDefaultReason::Unresolved(kind) => write!(f, "{kind}"),
            NoDefaultReason::Empty => write!(f, "no default values are defined"),
        }
    }
}

/// Main error type for cfgdefn library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Resolution Errors
    // -------------------------------------------------------------------------
    #[error("Managed object definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("Property '{property}' not found on definition '{definition}'")]
    PropertyNotFound { definition: String, property: String },

    #[error("Malformed default value '{literal}' for property '{property}': {reason}")]
    MalformedDefault {
        property: String,
        literal: String,
        reason: String,
    },

    #[error("Property '{property}' has no statically resolvable default: {reason}")]
    NoDefaultValue {
        property: String,
        reason: NoDefaultReason,
    },

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    // -------------------------------------------------------------------------
    // Registration Errors
    // -------------------------------------------------------------------------
    #[error("Definition '{0}' is already registered")]
    DuplicateDefinition(String),

    #[error("Invalid definition '{definition}': {reason}")]
    InvalidDefinition { definition: String, reason: String },

    #[error("A process-wide registry is already installed")]
    RegistryAlreadyInstalled,

    #[error("Registry not initialized")]
    NotInitialized,

    // -------------------------------------------------------------------------
    // Loading Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse metadata: {0}")]
    Parse(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::DefinitionNotFound(_) | Error::PropertyNotFound { .. }
        )
    }

    /// Check if the property simply has no static default.
    ///
    /// This is an expected outcome for aliased, inherited and undefined
    /// defaults, as opposed to a metadata defect.
    #[must_use]
    pub fn is_no_default(&self) -> bool {
        matches!(self, Error::NoDefaultValue { .. })
    }

    /// Check if a declared default literal failed to decode
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedDefault { .. })
    }
}

/// Read a file to a string with proper error handling
pub fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let not_found = Error::DefinitionNotFound("foo".into());
        assert!(not_found.is_not_found());
        assert!(!not_found.is_no_default());

        let no_default = Error::NoDefaultValue {
            property: "parent-dn".into(),
            reason: NoDefaultReason::Unresolved(UnresolvedKind::Undefined),
        };
        assert!(no_default.is_no_default());
        assert!(!no_default.is_malformed());

        let malformed = Error::MalformedDefault {
            property: "port".into(),
            literal: "abc".into(),
            reason: "not an integer".into(),
        };
        assert!(malformed.is_malformed());
        assert!(!malformed.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::PropertyNotFound {
            definition: "ldap-connection-handler".into(),
            property: "no-such".into(),
        };
        assert_eq!(
            err.to_string(),
            "Property 'no-such' not found on definition 'ldap-connection-handler'"
        );

        let err = Error::NoDefaultValue {
            property: "listen-port".into(),
            reason: NoDefaultReason::Empty,
        };
        assert_eq!(
            err.to_string(),
            "Property 'listen-port' has no statically resolvable default: no default values are defined"
        );
    }
}
