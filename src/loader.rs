//! Metadata document formats
//!
//! Definitions can be authored as documents instead of code. A document holds
//! a list of managed object definitions:
//!
//! ```json
//! {
//!   "definitions": [
//!     {
//!       "name": "ldap-connection-handler",
//!       "properties": [
//!         {
//!           "name": "max-request-size",
//!           "syntax": "size",
//!           "default": { "kind": "defined", "values": ["5 mb"] }
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::definition::ManagedObjectDefinition;
use crate::error::{Error, Result, read_file};

/// A set of managed object definitions as stored in a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default)]
    pub definitions: Vec<ManagedObjectDefinition>,
}

/// Trait for metadata document formats
pub trait MetadataFormat {
    /// File extension for this format (e.g., "json", "toml")
    fn extension(&self) -> &str;

    /// Parse a document
    fn parse(&self, content: &str) -> Result<MetadataDocument>;

    /// Render a document
    fn render(&self, document: &MetadataDocument) -> Result<String>;

    /// Read and parse a document file
    fn read(&self, path: &Path) -> Result<MetadataDocument> {
        let content = read_file(path)?;
        log::debug!("Loading {} metadata from {}", self.extension(), path.display());
        self.parse(&content)
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON metadata documents (default)
#[derive(Clone, Default)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    /// JSON with pretty printing enabled
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// JSON without pretty printing
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl MetadataFormat for JsonFormat {
    fn extension(&self) -> &str {
        "json"
    }

    fn parse(&self, content: &str) -> Result<MetadataDocument> {
        serde_json::from_str(content).map_err(Error::from)
    }

    fn render(&self, document: &MetadataDocument) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(document).map_err(Error::from)
        } else {
            serde_json::to_string(document).map_err(Error::from)
        }
    }
}

// =============================================================================
// TOML Format
// =============================================================================

/// TOML metadata documents
#[cfg(feature = "toml")]
#[derive(Clone, Default)]
pub struct TomlFormat;

#[cfg(feature = "toml")]
impl MetadataFormat for TomlFormat {
    fn extension(&self) -> &str {
        "toml"
    }

    fn parse(&self, content: &str) -> Result<MetadataDocument> {
        toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }

    fn render(&self, document: &MetadataDocument) -> Result<String> {
        toml::to_string_pretty(document).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// YAML Format
// =============================================================================

/// YAML metadata documents
#[cfg(feature = "yaml")]
#[derive(Clone, Default)]
pub struct YamlFormat;

#[cfg(feature = "yaml")]
impl MetadataFormat for YamlFormat {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn parse(&self, content: &str) -> Result<MetadataDocument> {
        serde_yaml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }

    fn render(&self, document: &MetadataDocument) -> Result<String> {
        serde_yaml::to_string(document).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// Convenience functions
// =============================================================================

/// Parse definitions from a JSON document
pub fn from_json_str(content: &str) -> Result<Vec<ManagedObjectDefinition>> {
    Ok(JsonFormat::new().parse(content)?.definitions)
}

/// Read definitions from a JSON document file
pub fn from_json_file(path: &Path) -> Result<Vec<ManagedObjectDefinition>> {
    Ok(JsonFormat::new().read(path)?.definitions)
}

/// Parse definitions from a TOML document
#[cfg(feature = "toml")]
pub fn from_toml_str(content: &str) -> Result<Vec<ManagedObjectDefinition>> {
    Ok(TomlFormat.parse(content)?.definitions)
}

/// Read definitions from a TOML document file
#[cfg(feature = "toml")]
pub fn from_toml_file(path: &Path) -> Result<Vec<ManagedObjectDefinition>> {
    Ok(TomlFormat.read(path)?.definitions)
}

/// Parse definitions from a YAML document
#[cfg(feature = "yaml")]
pub fn from_yaml_str(content: &str) -> Result<Vec<ManagedObjectDefinition>> {
    Ok(YamlFormat.parse(content)?.definitions)
}

/// Read definitions from a YAML document file
#[cfg(feature = "yaml")]
pub fn from_yaml_file(path: &Path) -> Result<Vec<ManagedObjectDefinition>> {
    Ok(YamlFormat.read(path)?.definitions)
}

// =============================================================================
// Tests
// =============================================================================
