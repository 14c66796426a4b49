// Basic usage example for cfgdefn
//
// Run with: cargo run --example basic_usage

use cfgdefn::{
    DefinitionRegistry, DocsConfig, DurationUnit, ManagedObjectDefinition, PropertyDefinition,
    PropertyValue, generate_docs, global,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Describe the metadata once at startup
    let registry = DefinitionRegistry::builder()
        .register(
            ManagedObjectDefinition::new("connection-handler")
                .config_interface("org.example.admin.server.ConnectionHandlerCfg")
                .property(PropertyDefinition::boolean("enabled"))
                .property(
                    PropertyDefinition::string("java-class")
                        .default_values(["org.example.ConnectionHandler"]),
                ),
        )
        .register(
            ManagedObjectDefinition::new("ldap-connection-handler")
                .config_interface("org.example.admin.server.LDAPConnectionHandlerCfg")
                .extends("connection-handler")
                .property(PropertyDefinition::size("max-request-size").default_values(["5 mb"]))
                .property(
                    PropertyDefinition::enumeration("log-level", ["DEBUG", "INFO", "WARN"])
                        .multi_valued()
                        .default_values(["WARN", "INFO", "INFO"]),
                )
                .property(
                    PropertyDefinition::duration("idle-time-limit", DurationUnit::Seconds)
                        .allow_unlimited()
                        .default_values(["unlimited"]),
                )
                .property(PropertyDefinition::dn("parent-dn").relative_inherited(1, "base-dn")),
        )
        .build()?;

    if let Err(errors) = registry.validate_defaults() {
        for error in errors {
            eprintln!("Metadata defect: {error}");
        }
    }

    // Resolve defaults by type and property name
    let size = registry.default_value_for("ldap-connection-handler", "max-request-size")?;
    println!("max-request-size = {}", size.get::<i64>()?);

    let levels = registry.default_value_for("ldap-connection-handler", "log-level")?;
    let levels: Vec<String> = levels.values().iter().map(ToString::to_string).collect();
    println!("log-level = {}", levels.join(", "));

    // Inherited defaults need live configuration state
    match registry.default_value_for("ldap-connection-handler", "parent-dn") {
        Ok(value) => println!("parent-dn = {value:?}"),
        Err(e) if e.is_no_default() => println!("parent-dn has no static default: {e}"),
        Err(e) => return Err(e.into()),
    }

    // Getter-style reads through a mock configuration
    let cfg = registry.mock("ldap-connection-handler")?;
    println!("getJavaClass() = {}", cfg.get_by_getter("getJavaClass")?.get::<String>()?);
    cfg.stub("parent-dn", PropertyValue::Dn("cn=connection handlers,cn=config".into()))?;
    println!("getParentDN() = {}", cfg.get_by_getter("getParentDN")?.get::<String>()?);

    // Process-wide access
    global::install(registry.clone())?;
    let idle = global::default_value_for_interface(
        "org.example.admin.server.LDAPConnectionHandlerCfg",
        "getIdleTimeLimit",
    )?;
    println!("idle-time-limit = {}", idle.values()[0]);

    println!("\n{}", generate_docs(&registry, DocsConfig::new().hide_advanced()));
    Ok(())
}
