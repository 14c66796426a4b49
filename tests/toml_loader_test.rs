//! TOML Metadata Integration Tests
//!
//! Loads definitions from TOML metadata documents (requires the `toml` feature).

mod common;

use cfgdefn::loader::{self, MetadataFormat, TomlFormat};
use cfgdefn::{DefaultBehavior, DefinitionRegistry, Error, PropertySyntax, PropertyValue};
use common::{init_logging, write_metadata};
use tempfile::TempDir;

const METADATA_TOML: &str = r#"
[[definitions]]
name = "ldap-connection-handler"
config_interface = "org.opends.server.admin.server.LDAPConnectionHandlerCfg"

[[definitions.properties]]
name = "max-request-size"
syntax = "size"
default = { kind = "defined", values = ["5 mb"] }

[[definitions.properties]]
name = "log-level"
syntax = "enum"
values = ["DEBUG", "INFO", "WARN"]
multi_valued = true
default = { kind = "defined", values = ["WARN", "INFO", "INFO"] }

[[definitions.properties]]
name = "parent-dn"
syntax = "dn"
default = { kind = "relative-inherited", offset = 1, property = "base-dn" }

[[definitions.properties]]
name = "idle-time-limit"
syntax = "duration"
base_unit = "seconds"
allow_unlimited = true
default = { kind = "defined", values = ["unlimited"] }
"#;

#[test]
fn test_parse_toml_document() {
    let definitions = loader::from_toml_str(METADATA_TOML).unwrap();
    assert_eq!(definitions.len(), 1);

    let defn = &definitions[0];
    let levels = defn.get_property("log-level").unwrap();
    assert!(levels.multi_valued);
    assert!(matches!(levels.syntax, PropertySyntax::Enum { ref values } if values.len() == 3));

    let parent_dn = defn.get_property("parent-dn").unwrap();
    assert_eq!(
        parent_dn.default_behavior,
        DefaultBehavior::RelativeInherited {
            offset: 1,
            property: "base-dn".into()
        }
    );
    assert_eq!(TomlFormat.extension(), "toml");
}

#[test]
fn test_load_toml_registry() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = write_metadata(&dir, "metadata.toml", METADATA_TOML);

    let registry = DefinitionRegistry::builder()
        .load_toml(&path)
        .unwrap()
        .build()
        .unwrap();

    let size = registry
        .default_value_for("ldap-connection-handler", "max-request-size")
        .unwrap();
    assert_eq!(size.as_single(), Some(&PropertyValue::Size(5_000_000)));

    let idle = registry
        .default_value_for("ldap-connection-handler", "idle-time-limit")
        .unwrap();
    assert_eq!(idle.as_single(), Some(&PropertyValue::Duration(-1)));

    let levels = registry
        .default_value_for_interface(
            "org.opends.server.admin.server.LDAPConnectionHandlerCfg",
            "getLogLevel",
        )
        .unwrap();
    assert_eq!(levels.values().len(), 2);
}

#[test]
fn test_invalid_toml_document() {
    let err = loader::from_toml_str("[[definitions]\nname = ").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
