//! Integration tests for cfgdefn-derive macro
//!
//! Tests the `#[derive(DeriveManagedObject)]` macro with various attribute combinations.

use cfgdefn::{
    DefaultBehavior, DefinitionRegistry, DeriveManagedObject, DurationUnit, ManagedObject,
    PropertySyntax, PropertyValue,
};

// =============================================================================
// Basic Derive Tests
// =============================================================================

#[allow(dead_code)]
#[derive(DeriveManagedObject)]
#[managed_object(
    name = "connection-handler",
    interface = "org.opends.server.admin.server.ConnectionHandlerCfg",
    description = "Accepts client connections"
)]
struct ConnectionHandlerCfg {
    enabled: bool,

    #[property(default = "org.opends.server.api.ConnectionHandler", advanced)]
    java_class: String,
}

#[test]
fn test_basic_derive() {
    let definition = ConnectionHandlerCfg::definition();

    assert_eq!(definition.name, "connection-handler");
    assert_eq!(
        definition.config_interface.as_deref(),
        Some("org.opends.server.admin.server.ConnectionHandlerCfg")
    );
    assert_eq!(definition.description.as_deref(), Some("Accepts client connections"));
    assert_eq!(definition.properties.len(), 2);

    let enabled = definition.get_property("enabled").unwrap();
    assert_eq!(enabled.syntax, PropertySyntax::Boolean);
    assert_eq!(enabled.default_behavior, DefaultBehavior::Undefined);

    let java_class = definition.get_property("java-class").unwrap();
    assert!(java_class.advanced);
    assert_eq!(
        java_class.default_behavior,
        DefaultBehavior::defined(["org.opends.server.api.ConnectionHandler"])
    );
}

// =============================================================================
// Syntaxes and Behaviors
// =============================================================================

#[allow(dead_code)]
#[derive(DeriveManagedObject)]
#[managed_object(name = "ldap-connection-handler", parent = "connection-handler")]
struct LdapConnectionHandlerCfg {
    #[property(default = "5000000", min = 0)]
    max_request_size: i64,

    #[property(enum_values = ["DEBUG", "INFO", "WARN"], defaults = ["WARN", "INFO", "INFO"])]
    log_level: Vec<String>,

    #[property(syntax = "dn", relative_offset = 1, inherited_property = "base-dn")]
    parent_dn: String,

    #[property(alias_of = "key-alias", read_only)]
    ssl_cert_nickname: Option<String>,

    #[property(syntax = "dn", inherited_from = "cn=config", inherited_property = "key-manager-provider")]
    key_manager_provider: String,

    #[property(syntax = "duration", base_unit = "s", default = "2 minutes", unlimited)]
    idle_time_limit: i64,

    #[property(syntax = "size", default = "4 kib")]
    buffer_size: u64,

    #[property(name = "listen-address", pattern = "^[a-z0-9.]+$", default = "0.0.0.0")]
    address: String,

    #[property(skip)]
    cached: Vec<u8>,
}

#[test]
fn test_field_attributes() {
    let definition = LdapConnectionHandlerCfg::definition();

    assert_eq!(definition.parent.as_deref(), Some("connection-handler"));
    assert_eq!(definition.properties.len(), 8);
    assert!(definition.get_property("cached").is_none());

    let size = definition.get_property("max-request-size").unwrap();
    assert_eq!(
        size.syntax,
        PropertySyntax::Integer {
            lower: Some(0),
            upper: None,
            allow_unlimited: false
        }
    );

    let levels = definition.get_property("log-level").unwrap();
    assert!(levels.multi_valued);
    assert!(matches!(levels.syntax, PropertySyntax::Enum { ref values } if values.len() == 3));

    let parent_dn = definition.get_property("parent-dn").unwrap();
    assert_eq!(parent_dn.syntax, PropertySyntax::Dn);
    assert_eq!(
        parent_dn.default_behavior,
        DefaultBehavior::RelativeInherited {
            offset: 1,
            property: "base-dn".into()
        }
    );

    let nickname = definition.get_property("ssl-cert-nickname").unwrap();
    assert!(nickname.read_only);
    assert!(!nickname.multi_valued);
    assert!(matches!(nickname.syntax, PropertySyntax::String { pattern: None }));

    let provider = definition.get_property("key-manager-provider").unwrap();
    assert!(matches!(
        provider.default_behavior,
        DefaultBehavior::AbsoluteInherited { ref path, .. } if path == "cn=config"
    ));

    let idle = definition.get_property("idle-time-limit").unwrap();
    assert_eq!(
        idle.syntax,
        PropertySyntax::Duration {
            base_unit: DurationUnit::Seconds,
            lower: None,
            upper: None,
            allow_unlimited: true
        }
    );

    let address = definition.get_property("listen-address").unwrap();
    assert!(matches!(address.syntax, PropertySyntax::String { pattern: Some(_) }));
}

// =============================================================================
// Resolution Through a Registry
// =============================================================================

#[test]
fn test_derived_definitions_resolve_defaults() {
    let registry = DefinitionRegistry::builder()
        .with_definition::<ConnectionHandlerCfg>()
        .with_definition::<LdapConnectionHandlerCfg>()
        .build()
        .unwrap();
    assert!(registry.validate_defaults().is_ok());

    let size = registry
        .default_value_for("ldap-connection-handler", "max-request-size")
        .unwrap();
    assert_eq!(size.get::<i64>().unwrap(), 5_000_000);

    let levels = registry
        .default_value_for("ldap-connection-handler", "log-level")
        .unwrap();
    let names: Vec<String> = levels
        .into_values()
        .into_iter()
        .map(|v| String::try_from(v).unwrap())
        .collect();
    assert_eq!(names, vec!["INFO", "WARN"]);

    let idle = registry
        .default_value_for("ldap-connection-handler", "idle-time-limit")
        .unwrap();
    assert_eq!(idle.as_single(), Some(&PropertyValue::Duration(120)));

    let buffer = registry
        .default_value_for("ldap-connection-handler", "buffer-size")
        .unwrap();
    assert_eq!(buffer.as_single(), Some(&PropertyValue::Size(4096)));

    assert!(
        registry
            .default_value_for("ldap-connection-handler", "parent-dn")
            .unwrap_err()
            .is_no_default()
    );

    // Inherited from the derived parent
    let java_class = registry
        .default_value_for_interface("org.opends.server.admin.server.ConnectionHandlerCfg", "getJavaClass")
        .unwrap();
    assert!(java_class.as_single().is_some());
}

// =============================================================================
// Default Naming
// =============================================================================

#[allow(dead_code)]
#[derive(DeriveManagedObject)]
struct LDIFBackend {
    #[property(defaults = [])]
    import_paths: Vec<String>,
}

#[test]
fn test_name_defaults_to_kebab_case() {
    let definition = LDIFBackend::definition();
    assert_eq!(definition.name, "ldif-backend");

    let paths = definition.get_property("import-paths").unwrap();
    assert!(paths.multi_valued);
    assert_eq!(paths.default_behavior, DefaultBehavior::defined(Vec::<String>::new()));
}
