//! Definition registry and default-value answer engine
//!
//! This module contains the [`DefinitionRegistry`] struct, the primary entry
//! point for resolving the default value of a property from static metadata.
//!
//! Resolution goes through these steps:
//!
//! 1. Locate the managed object definition (by type name, or by
//!    configuration interface name through the naming convention)
//! 2. Locate the property definition, walking up the parent chain
//! 3. Resolve the property's default behavior with its syntax
//! 4. Shape the result as a single value or an ordered set
//!
//! Every step reports failure with its own error kind; nothing is retried or
//! replaced by a guessed value.

mod answer;
mod builder;
pub mod global;

pub use answer::ResolvedDefault;
pub use builder::DefinitionRegistryBuilder;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::definition::{ManagedObjectDefinition, PropertyDefinition, PropertyValue};
use crate::error::{Error, Result};
use crate::mock::MockConfiguration;
use crate::naming;
use crate::resolver::{self, DefaultResolution};

pub(crate) struct RegistryInner {
    pub(crate) definitions: HashMap<String, ManagedObjectDefinition>,
    /// Metadata type name (see [`naming::definition_type_name`]) to definition name
    pub(crate) by_type_name: HashMap<String, String>,
}

/// Immutable registry of managed object definitions.
///
/// Built once with [`DefinitionRegistry::builder`] and read-only afterwards, so
/// it can be shared freely between threads. Cloning is cheap.
///
/// # Example
///
/// ```rust
/// use cfgdefn::{DefinitionRegistry, ManagedObjectDefinition, PropertyDefinition, PropertyValue};
///
/// let registry = DefinitionRegistry::builder()
///     .register(
///         ManagedObjectDefinition::new("ldap-connection-handler")
///             .property(PropertyDefinition::integer("max-request-size").default_values(["5000000"])),
///     )
///     .build()?;
///
/// let default = registry.default_value_for("ldap-connection-handler", "max-request-size")?;
/// assert_eq!(default.as_single(), Some(&PropertyValue::Integer(5_000_000)));
/// # Ok::<(), cfgdefn::Error>(())
/// ```
#[derive(Clone)]
pub struct DefinitionRegistry {
    inner: Arc<RegistryInner>,
}

impl std::fmt::Debug for DefinitionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.inner.definitions.keys().collect();
        names.sort();
        f.debug_struct("DefinitionRegistry")
            .field("definitions", &names)
            .finish()
    }
}

impl DefinitionRegistry {
    /// Create a new builder
    pub fn builder() -> DefinitionRegistryBuilder {
        DefinitionRegistryBuilder::new()
    }

    pub(crate) fn from_inner(inner: RegistryInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    // =========================================================================
    // Definition lookup
    // =========================================================================

    /// Get a definition by managed object type name
    ///
    /// # Errors
    ///
    /// Returns `Error::DefinitionNotFound` if no such type is registered.
    pub fn definition(&self, managed_object_type: &str) -> Result<&ManagedObjectDefinition> {
        self.inner
            .definitions
            .get(managed_object_type)
            .ok_or_else(|| Error::DefinitionNotFound(managed_object_type.to_string()))
    }

    /// Get the definition describing a configuration interface
    ///
    /// The interface name is mapped to its metadata type name with
    /// [`naming::definition_type_name`].
    ///
    /// # Errors
    ///
    /// Returns `Error::DefinitionNotFound` with the metadata type name if no
    /// definition was registered for it.
    pub fn definition_for_interface(&self, config_interface: &str) -> Result<&ManagedObjectDefinition> {
        let type_name = naming::definition_type_name(config_interface);
        self.inner
            .by_type_name
            .get(&type_name)
            .and_then(|name| self.inner.definitions.get(name))
            .ok_or(Error::DefinitionNotFound(type_name))
    }

    /// All registered definitions, sorted by name
    pub fn definitions(&self) -> Vec<&ManagedObjectDefinition> {
        let mut definitions: Vec<_> = self.inner.definitions.values().collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub fn contains(&self, managed_object_type: &str) -> bool {
        self.inner.definitions.contains_key(managed_object_type)
    }

    // =========================================================================
    // Property lookup
    // =========================================================================

    /// Get a property of a managed object type, including inherited ones
    ///
    /// A property declared on the definition shadows one with the same name
    /// on its ancestors.
    ///
    /// # Errors
    ///
    /// - `Error::DefinitionNotFound` if the type is not registered
    /// - `Error::PropertyNotFound` if neither the type nor its ancestors declare the property
    pub fn property(&self, managed_object_type: &str, property: &str) -> Result<&PropertyDefinition> {
        self.lineage(managed_object_type)?
            .into_iter()
            .find_map(|definition| definition.get_property(property))
            .ok_or_else(|| Error::PropertyNotFound {
                definition: managed_object_type.to_string(),
                property: property.to_string(),
            })
    }

    /// All properties of a managed object type, including inherited ones, sorted by name
    ///
    /// # Errors
    ///
    /// Returns `Error::DefinitionNotFound` if the type is not registered.
    pub fn properties(&self, managed_object_type: &str) -> Result<Vec<&PropertyDefinition>> {
        let mut merged: BTreeMap<&str, &PropertyDefinition> = BTreeMap::new();
        for definition in self.lineage(managed_object_type)? {
            for (name, property) in &definition.properties {
                merged.entry(name.as_str()).or_insert(property);
            }
        }
        Ok(merged.into_values().collect())
    }

    /// Get the property backing a getter such as `getMaxRequestSize`
    ///
    /// # Errors
    ///
    /// - `Error::DefinitionNotFound` if the type is not registered
    /// - `Error::PropertyNotFound` if the name is not a getter or matches no property
    pub fn property_for_getter(&self, managed_object_type: &str, getter: &str) -> Result<&PropertyDefinition> {
        let not_found = || Error::PropertyNotFound {
            definition: managed_object_type.to_string(),
            property: naming::property_accessor_name(getter).unwrap_or_else(|| getter.to_string()),
        };
        let base = naming::getter_base_name(getter).ok_or_else(not_found)?;
        let key = naming::accessor_key(base);
        self.properties(managed_object_type)?
            .into_iter()
            .find(|property| naming::accessor_key(&property.name) == key)
            .ok_or_else(not_found)
    }

    /// The definition followed by its ancestors, nearest first
    fn lineage(&self, managed_object_type: &str) -> Result<Vec<&ManagedObjectDefinition>> {
        let mut current = self.definition(managed_object_type)?;
        let mut lineage = vec![current];
        while let Some(parent) = &current.parent {
            current = self.definition(parent)?;
            lineage.push(current);
        }
        Ok(lineage)
    }

    // =========================================================================
    // Default resolution
    // =========================================================================

    /// Resolve a property's default without shaping it.
    ///
    /// Unlike [`default_value_for`](Self::default_value_for), an alias,
    /// inherited or undefined default is returned as
    /// [`DefaultResolution::Unresolved`] instead of an error, and an empty
    /// defined default as an empty set.
    ///
    /// # Errors
    ///
    /// - `Error::DefinitionNotFound` / `Error::PropertyNotFound` on failed lookups
    /// - `Error::MalformedDefault` if a default literal does not decode
    pub fn resolve_default(
        &self,
        managed_object_type: &str,
        property: &str,
    ) -> Result<DefaultResolution<PropertyValue>> {
        let definition = self.property(managed_object_type, property)?;
        resolve_property(definition)
    }

    /// Get the default value of a property.
    ///
    /// Multi-valued properties yield their whole (possibly empty) ordered set;
    /// single-valued properties yield one value.
    ///
    /// # Errors
    ///
    /// - `Error::DefinitionNotFound` if the type is not registered
    /// - `Error::PropertyNotFound` if the property does not exist
    /// - `Error::MalformedDefault` if a default literal does not decode
    /// - `Error::NoDefaultValue` if the default is aliased, inherited,
    ///   undefined, or empty on a single-valued property
    pub fn default_value_for(&self, managed_object_type: &str, property: &str) -> Result<ResolvedDefault> {
        let definition = self.property(managed_object_type, property)?;
        answer::shape(definition, resolve_property(definition)?)
    }

    /// Get the default value behind a getter of a configuration interface
    ///
    /// ```rust
    /// use cfgdefn::{DefinitionRegistry, ManagedObjectDefinition, PropertyDefinition};
    ///
    /// let registry = DefinitionRegistry::builder()
    ///     .register(
    ///         ManagedObjectDefinition::new("ldap-connection-handler")
    ///             .config_interface("org.example.admin.server.LDAPConnectionHandlerCfg")
    ///             .property(PropertyDefinition::boolean("use-ssl").default_values(["false"])),
    ///     )
    ///     .build()?;
    ///
    /// let default = registry.default_value_for_interface(
    ///     "org.example.admin.server.LDAPConnectionHandlerCfg",
    ///     "isUseSSL",
    /// )?;
    /// assert!(!default.get::<bool>()?);
    /// # Ok::<(), cfgdefn::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`default_value_for`](Self::default_value_for).
    pub fn default_value_for_interface(&self, config_interface: &str, getter: &str) -> Result<ResolvedDefault> {
        let definition = self.definition_for_interface(config_interface)?;
        let property = self.property_for_getter(&definition.name, getter)?;
        answer::shape(property, resolve_property(property)?)
    }

    /// Decode every defined default of every registered property.
    ///
    /// Authoring check for metadata: collects every `Error::MalformedDefault`
    /// instead of stopping at the first one.
    ///
    /// # Errors
    ///
    /// Returns all decoding failures found, ordered by definition and property name.
    pub fn validate_defaults(&self) -> std::result::Result<(), Vec<Error>> {
        let errors: Vec<Error> = self
            .definitions()
            .into_iter()
            .flat_map(|definition| definition.properties.values())
            .filter_map(|property| resolve_property(property).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Create a mock configuration object for a managed object type
    ///
    /// # Errors
    ///
    /// Returns `Error::DefinitionNotFound` if the type is not registered.
    pub fn mock(&self, managed_object_type: &str) -> Result<MockConfiguration> {
        MockConfiguration::new(self, managed_object_type)
    }
}

fn resolve_property(property: &PropertyDefinition) -> Result<DefaultResolution<PropertyValue>> {
    log::trace!(
        "Resolving default of '{}' ({})",
        property.name,
        property.syntax.name()
    );
    resolver::resolve(&property.default_behavior, &property.syntax).map_err(|e| {
        Error::MalformedDefault {
            property: property.name.clone(),
            literal: e.literal,
            reason: e.reason,
        }
    })
}

// =============================================================================
// Tests
// =============================================================================
