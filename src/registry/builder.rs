//! Builder for DefinitionRegistry
//!
//! This module contains [`DefinitionRegistryBuilder`] which collects
//! definitions and validates them into an immutable
//! [`DefinitionRegistry`](super::DefinitionRegistry).

use std::collections::HashMap;
use std::path::Path;

use crate::definition::{ManagedObject, ManagedObjectDefinition};
use crate::error::{Error, Result};
use crate::loader;

use super::{DefinitionRegistry, RegistryInner};

/// Builder for creating a [`DefinitionRegistry`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use cfgdefn::{DefinitionRegistry, ManagedObjectDefinition, PropertyDefinition};
///
/// let registry = DefinitionRegistry::builder()
///     .register(
///         ManagedObjectDefinition::new("ldap-connection-handler")
///             .property(PropertyDefinition::integer("max-request-size").default_values(["5000000"])),
///     )
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct DefinitionRegistryBuilder {
    definitions: Vec<ManagedObjectDefinition>,
}

impl DefinitionRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition
    pub fn register(mut self, definition: ManagedObjectDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Register the definition described by a [`ManagedObject`] type
    pub fn with_definition<T: ManagedObject>(self) -> Self {
        self.register(T::definition())
    }

    /// Register every definition from a JSON metadata document
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn load_json(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.definitions.extend(loader::from_json_file(path.as_ref())?);
        Ok(self)
    }

    /// Register every definition from a TOML metadata document
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    #[cfg(feature = "toml")]
    pub fn load_toml(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.definitions.extend(loader::from_toml_file(path.as_ref())?);
        Ok(self)
    }

    /// Register every definition from a YAML metadata document
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    #[cfg(feature = "yaml")]
    pub fn load_yaml(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.definitions.extend(loader::from_yaml_file(path.as_ref())?);
        Ok(self)
    }

    /// Validate the collected definitions and build the registry.
    ///
    /// Default literals are not decoded here; malformed defaults surface when
    /// they are resolved.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidDefinition` if a definition is malformed, extends an
    ///   unknown parent, or takes part in a parent cycle
    /// - `Error::DuplicateDefinition` if two definitions share a name or a
    ///   configuration interface
    pub fn build(self) -> Result<DefinitionRegistry> {
        let mut definitions = HashMap::with_capacity(self.definitions.len());
        let mut by_type_name = HashMap::new();

        for definition in self.definitions {
            definition
                .validate()
                .map_err(|reason| Error::InvalidDefinition {
                    definition: definition.name.clone(),
                    reason,
                })?;

            if let Some(type_name) = definition.definition_type_name() {
                if by_type_name
                    .insert(type_name.clone(), definition.name.clone())
                    .is_some()
                {
                    return Err(Error::DuplicateDefinition(type_name));
                }
            }

            if definitions.contains_key(&definition.name) {
                return Err(Error::DuplicateDefinition(definition.name));
            }
            log::debug!(
                "Registering definition '{}' with {} properties",
                definition.name,
                definition.properties.len()
            );
            definitions.insert(definition.name.clone(), definition);
        }

        check_parents(&definitions)?;

        log::debug!("Built registry with {} definitions", definitions.len());
        Ok(DefinitionRegistry::from_inner(RegistryInner {
            definitions,
            by_type_name,
        }))
    }
}

/// Every parent must be registered and parent chains must terminate
fn check_parents(definitions: &HashMap<String, ManagedObjectDefinition>) -> Result<()> {
    for definition in definitions.values() {
        let mut current = definition;
        let mut depth = 0;
        while let Some(parent) = &current.parent {
            current = definitions
                .get(parent)
                .ok_or_else(|| Error::InvalidDefinition {
                    definition: current.name.clone(),
                    reason: format!("unknown parent definition '{parent}'"),
                })?;
            depth += 1;
            if depth > definitions.len() {
                return Err(Error::InvalidDefinition {
                    definition: definition.name.clone(),
                    reason: "parent chain contains a cycle".to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::PropertyDefinition;

    #[test]
    fn test_duplicate_names_rejected() {
        let result = DefinitionRegistryBuilder::new()
            .register(ManagedObjectDefinition::new("a"))
            .register(ManagedObjectDefinition::new("a"))
            .build();
        assert!(matches!(result, Err(Error::DuplicateDefinition(name)) if name == "a"));
    }

    #[test]
    fn test_duplicate_interfaces_rejected() {
        let result = DefinitionRegistryBuilder::new()
            .register(ManagedObjectDefinition::new("a").config_interface("x.admin.server.FooCfg"))
            .register(ManagedObjectDefinition::new("b").config_interface("x.admin.server.FooCfg"))
            .build();
        assert!(matches!(result, Err(Error::DuplicateDefinition(_))));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let result = DefinitionRegistryBuilder::new()
            .register(ManagedObjectDefinition::new("child").extends("missing"))
            .build();
        assert!(matches!(result, Err(Error::InvalidDefinition { .. })));
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let result = DefinitionRegistryBuilder::new()
            .register(ManagedObjectDefinition::new("a").extends("b"))
            .register(ManagedObjectDefinition::new("b").extends("a"))
            .build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_malformed_defaults_do_not_fail_build() {
        let registry = DefinitionRegistryBuilder::new()
            .register(
                ManagedObjectDefinition::new("a")
                    .property(PropertyDefinition::integer("n").default_values(["abc"])),
            )
            .build();
        assert!(registry.is_ok());
    }

    #[test]
    fn test_invalid_syntax_rejected() {
        let result = DefinitionRegistryBuilder::new()
            .register(
                ManagedObjectDefinition::new("a")
                    .property(PropertyDefinition::enumeration("level", Vec::<String>::new())),
            )
            .build();
        assert!(matches!(result, Err(Error::InvalidDefinition { definition, .. }) if definition == "a"));
    }
}
