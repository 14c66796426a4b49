//! Common test utilities for cfgdefn integration tests
//!
//! Provides a shared metadata document describing a small connection handler
//! hierarchy, and a fixture loading it from disk.

#![allow(dead_code)]

use cfgdefn::{DefinitionRegistry, DurationUnit, ManagedObjectDefinition, PropertyDefinition};
use std::path::PathBuf;
use tempfile::TempDir;

pub const CONNECTION_HANDLER: &str = "connection-handler";
pub const LDAP_CONNECTION_HANDLER: &str = "ldap-connection-handler";
pub const LDAP_INTERFACE: &str = "org.opends.server.admin.server.LDAPConnectionHandlerCfg";

// =============================================================================
// Test Metadata
// =============================================================================

/// Metadata document with a parent type and a child overriding some of its properties
pub const METADATA_JSON: &str = r#"{
  "definitions": [
    {
      "name": "connection-handler",
      "config_interface": "org.opends.server.admin.server.ConnectionHandlerCfg",
      "description": "Accepts client connections",
      "properties": [
        {"name": "enabled", "syntax": "boolean"},
        {"name": "java-class", "syntax": "string", "default": {"kind": "defined", "values": ["org.opends.server.api.ConnectionHandler"]}},
        {"name": "allowed-client", "syntax": "string", "multi_valued": true, "default": {"kind": "defined", "values": []}}
      ]
    },
    {
      "name": "ldap-connection-handler",
      "config_interface": "org.opends.server.admin.server.LDAPConnectionHandlerCfg",
      "parent": "connection-handler",
      "properties": [
        {"name": "max-request-size", "syntax": "integer", "default": {"kind": "defined", "values": ["5000000"]}},
        {
          "name": "log-level",
          "syntax": "enum",
          "values": ["DEBUG", "INFO", "WARN", "ERROR"],
          "multi_valued": true,
          "default": {"kind": "defined", "values": ["INFO", "WARN", "INFO"]}
        },
        {"name": "parent-dn", "syntax": "dn", "default": {"kind": "relative-inherited", "offset": 1, "property": "base-dn"}},
        {"name": "listen-port", "syntax": "integer", "lower": 1, "upper": 65535, "default": {"kind": "defined", "values": ["389"]}},
        {"name": "use-ssl", "syntax": "boolean", "default": {"kind": "defined", "values": ["false"]}},
        {"name": "ssl-cert-nickname", "syntax": "string", "default": {"kind": "alias-of", "property": "key-alias"}},
        {"name": "key-manager-provider", "syntax": "dn", "default": {"kind": "absolute-inherited", "path": "/", "property": "key-manager-provider"}},
        {"name": "max-blocked-write-time-limit", "syntax": "duration", "base_unit": "milliseconds", "default": {"kind": "defined", "values": ["2 minutes"]}},
        {"name": "buffer-size", "syntax": "size", "allow_unlimited": true, "default": {"kind": "defined", "values": ["4 kib"]}}
      ]
    }
  ]
}"#;

/// The same `ldap-connection-handler` type declared in code
pub fn ldap_connection_handler() -> ManagedObjectDefinition {
    ManagedObjectDefinition::new(LDAP_CONNECTION_HANDLER)
        .config_interface(LDAP_INTERFACE)
        .property(PropertyDefinition::integer("max-request-size").default_values(["5000000"]))
        .property(
            PropertyDefinition::enumeration("log-level", ["DEBUG", "INFO", "WARN", "ERROR"])
                .multi_valued()
                .default_values(["INFO", "WARN", "INFO"]),
        )
        .property(PropertyDefinition::dn("parent-dn").relative_inherited(1, "base-dn"))
        .property(
            PropertyDefinition::duration("max-blocked-write-time-limit", DurationUnit::Milliseconds)
                .default_values(["2 minutes"]),
        )
}

// =============================================================================
// Test Fixture
// =============================================================================

/// Test fixture holding a registry loaded from a metadata file
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub registry: DefinitionRegistry,
}

impl TestFixture {
    /// Write the shared metadata document to a temp dir and load it
    pub fn new() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_metadata(&temp_dir, "metadata.json", METADATA_JSON);
        let registry = DefinitionRegistry::builder()
            .load_json(&path)
            .expect("Failed to load metadata")
            .build()
            .expect("Failed to build registry");

        Self { temp_dir, registry }
    }

    /// Path of a file inside the fixture's temp dir
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Route `log` output through the test harness; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Write a metadata document into a directory
pub fn write_metadata(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write metadata");
    path
}
