// Derive macro usage example for cfgdefn
//
// Run with: cargo run --example derive_usage --features derive

use cfgdefn::{DefinitionRegistry, DeriveManagedObject};

// =============================================================================
// Definitions declared with the derive macro
// =============================================================================

/// Common connection handler properties
#[allow(dead_code)]
#[derive(DeriveManagedObject)]
#[managed_object(
    name = "connection-handler",
    interface = "org.example.admin.server.ConnectionHandlerCfg"
)]
struct ConnectionHandlerCfg {
    #[property(description = "Whether the handler accepts connections")]
    enabled: bool,

    #[property(default = "org.example.ConnectionHandler", advanced)]
    java_class: String,
}

/// LDAP connection handler properties
#[allow(dead_code)]
#[derive(DeriveManagedObject)]
#[managed_object(
    name = "ldap-connection-handler",
    interface = "org.example.admin.server.LDAPConnectionHandlerCfg",
    parent = "connection-handler"
)]
struct LdapConnectionHandlerCfg {
    #[property(default = "389", min = 1, max = 65535)]
    listen_port: u16,

    #[property(syntax = "size", default = "5 mb")]
    max_request_size: i64,

    #[property(enum_values = ["DEBUG", "INFO", "WARN"], defaults = ["WARN", "INFO"])]
    log_level: Vec<String>,

    #[property(alias_of = "key-alias")]
    ssl_cert_nickname: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let registry = DefinitionRegistry::builder()
        .with_definition::<ConnectionHandlerCfg>()
        .with_definition::<LdapConnectionHandlerCfg>()
        .build()?;

    let interface = "org.example.admin.server.LDAPConnectionHandlerCfg";
    for getter in ["getListenPort", "getMaxRequestSize", "getLogLevel", "getJavaClass", "getSslCertNickname"] {
        match registry.default_value_for_interface(interface, getter) {
            Ok(default) => {
                let values: Vec<String> = default.values().iter().map(ToString::to_string).collect();
                println!("{getter}() = {}", values.join(", "));
            }
            Err(e) => println!("{getter}(): {e}"),
        }
    }

    Ok(())
}
