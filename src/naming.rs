//! Naming conventions linking configuration interfaces to their metadata
//!
//! - A configuration interface `[package].admin.server.FooCfg` is described by
//!   the metadata type `[package].admin.meta.FooCfgDefn`.
//! - A getter `getMaxRequestSize` (or `isEnabled` for booleans) is backed by
//!   the accessor `maxRequestSizePropertyDefinition`.
//! - Property names are hyphenated (`max-request-size`); [`accessor_key`]
//!   folds both spellings onto the same lookup key.

/// Namespace segment of configuration interfaces
pub const SERVER_SEGMENT: &str = ".admin.server";
/// Namespace segment of metadata definition types
pub const META_SEGMENT: &str = ".admin.meta";
/// Suffix appended to a configuration interface name to name its metadata type
pub const DEFINITION_SUFFIX: &str = "Defn";
/// Suffix of property definition accessors
pub const ACCESSOR_SUFFIX: &str = "PropertyDefinition";

/// Metadata definition type name for a configuration interface name
///
/// ```
/// assert_eq!(
///     cfgdefn::naming::definition_type_name("org.example.admin.server.LDAPConnectionHandlerCfg"),
///     "org.example.admin.meta.LDAPConnectionHandlerCfgDefn"
/// );
/// ```
#[must_use]
pub fn definition_type_name(config_interface: &str) -> String {
    format!(
        "{}{DEFINITION_SUFFIX}",
        config_interface.replace(SERVER_SEGMENT, META_SEGMENT)
    )
}

/// Strip the `get`/`is` prefix from a getter name
///
/// Returns `None` if the name is not a getter (the prefix must be followed by
/// an upper-case letter).
pub fn getter_base_name(getter: &str) -> Option<&str> {
    let base = getter
        .strip_prefix("get")
        .or_else(|| getter.strip_prefix("is"))?;
    base.chars()
        .next()
        .filter(char::is_ascii_uppercase)
        .map(|_| base)
}

/// Property definition accessor name for a getter
///
/// ```
/// assert_eq!(
///     cfgdefn::naming::property_accessor_name("getMaxRequestSize").as_deref(),
///     Some("maxRequestSizePropertyDefinition")
/// );
/// assert_eq!(cfgdefn::naming::property_accessor_name("toString"), None);
/// ```
pub fn property_accessor_name(getter: &str) -> Option<String> {
    let base = getter_base_name(getter)?;
    let mut chars = base.chars();
    let first = chars.next()?;
    Some(format!(
        "{}{}{ACCESSOR_SUFFIX}",
        first.to_ascii_lowercase(),
        chars.as_str()
    ))
}

/// Property definition accessor name for a hyphenated property name
#[must_use]
pub fn accessor_for_property(property: &str) -> String {
    let mut accessor = String::with_capacity(property.len() + ACCESSOR_SUFFIX.len());
    let mut upper_next = false;
    for c in property.chars() {
        if c == '-' || c == '_' {
            upper_next = !accessor.is_empty();
        } else if upper_next {
            accessor.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            accessor.push(c);
        }
    }
    accessor.push_str(ACCESSOR_SUFFIX);
    accessor
}

/// Case- and separator-insensitive key used to match getters to properties
#[must_use]
pub fn accessor_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
