//! Managed object definitions
//!
//! A [`ManagedObjectDefinition`] describes one class of configuration (for
//! example an LDAP connection handler) through its property definitions.
//! Definitions may extend a parent definition, inheriting every property the
//! parent declares.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::property::PropertyDefinition;
use crate::naming;

/// Static metadata for one managed object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedObjectDefinition {
    /// Type identifier, e.g. `ldap-connection-handler`
    pub name: String,

    /// Fully qualified name of the configuration interface this definition
    /// describes, e.g. `org.example.admin.server.LDAPConnectionHandlerCfg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_interface: Option<String>,

    /// Name of the parent definition whose properties are inherited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Properties declared by this definition, keyed by property name
    #[serde(default, with = "property_list")]
    pub properties: BTreeMap<String, PropertyDefinition>,
}

impl ManagedObjectDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_interface: None,
            parent: None,
            description: None,
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn config_interface(mut self, interface: impl Into<String>) -> Self {
        self.config_interface = Some(interface.into());
        self
    }

    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property definition, replacing any with the same name
    #[must_use]
    pub fn property(mut self, property: PropertyDefinition) -> Self {
        self.properties.insert(property.name.clone(), property);
        self
    }

    /// Look up a property declared directly on this definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.get(name)
    }

    /// Metadata type name derived from the configuration interface, if any
    #[must_use]
    pub fn definition_type_name(&self) -> Option<String> {
        self.config_interface
            .as_deref()
            .map(naming::definition_type_name)
    }

    /// Validate the definition's own declarations
    ///
    /// Parent references are checked by the registry, which knows the other
    /// definitions.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("definition name cannot be empty".to_string());
        }
        if self.parent.as_deref() == Some(self.name.as_str()) {
            return Err("definition cannot extend itself".to_string());
        }

        let mut accessors: BTreeMap<String, &str> = BTreeMap::new();
        for (key, property) in &self.properties {
            if key != &property.name {
                return Err(format!(
                    "property '{}' is registered under key '{key}'",
                    property.name
                ));
            }
            property.validate()?;
            let accessor = naming::accessor_key(&property.name);
            if let Some(existing) = accessors.insert(accessor, &property.name) {
                return Err(format!(
                    "properties '{existing}' and '{}' map to the same accessor",
                    property.name
                ));
            }
        }
        Ok(())
    }
}

/// Trait for types that describe a managed object definition
///
/// Usually implemented with `#[derive(ManagedObject)]` (requires the `derive`
/// feature) on a struct whose fields are the managed object's properties.
pub trait ManagedObject {
    /// Build the static definition for this managed object type
    fn definition() -> ManagedObjectDefinition;
}

/// Properties are written as a list in metadata documents and keyed by name in memory
mod property_list {
    use super::PropertyDefinition;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        properties: &BTreeMap<String, PropertyDefinition>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let list: Vec<&PropertyDefinition> = properties.values().collect();
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, PropertyDefinition>, D::Error> {
        let list = Vec::<PropertyDefinition>::deserialize(deserializer)?;
        let mut properties = BTreeMap::new();
        for property in list {
            if properties.contains_key(&property.name) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate property '{}'",
                    property.name
                )));
            }
            properties.insert(property.name.clone(), property);
        }
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_builder() {
        let defn = ManagedObjectDefinition::new("ldap-connection-handler")
            .config_interface("org.example.admin.server.LDAPConnectionHandlerCfg")
            .extends("connection-handler")
            .property(PropertyDefinition::integer("max-request-size").default_values(["5000000"]));

        assert!(defn.get_property("max-request-size").is_some());
        assert!(defn.get_property("listen-port").is_none());
        assert_eq!(
            defn.definition_type_name().as_deref(),
            Some("org.example.admin.meta.LDAPConnectionHandlerCfgDefn")
        );
        assert!(defn.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_accessor_collision() {
        let defn = ManagedObjectDefinition::new("collision")
            .property(PropertyDefinition::string("a-bc"))
            .property(PropertyDefinition::string("ab-c"));
        let err = defn.validate().unwrap_err();
        assert!(err.contains("same accessor"));
    }

    #[test]
    fn test_validate_rejects_self_parent() {
        let defn = ManagedObjectDefinition::new("loop").extends("loop");
        assert!(defn.validate().is_err());
    }

    #[test]
    fn test_duplicate_property_in_document() {
        let json = r#"{
            "name": "dup",
            "properties": [
                {"name": "enabled", "syntax": "boolean"},
                {"name": "enabled", "syntax": "boolean"}
            ]
        }"#;
        let result: Result<ManagedObjectDefinition, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
