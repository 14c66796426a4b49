//! Mock configuration objects backed by static defaults
//!
//! A [`MockConfiguration`] answers property reads for one managed object type
//! with the property's default value, the way a live configuration object
//! would before any setting is changed. Individual properties can be stubbed
//! with other values, and reads are counted for verification.
//!
//! ```rust
//! use cfgdefn::{DefinitionRegistry, ManagedObjectDefinition, PropertyDefinition, PropertyValue};
//!
//! let registry = DefinitionRegistry::builder()
//!     .register(
//!         ManagedObjectDefinition::new("ldap-connection-handler")
//!             .property(PropertyDefinition::integer("max-request-size").default_values(["5000000"])),
//!     )
//!     .build()?;
//!
//! let cfg = registry.mock("ldap-connection-handler")?;
//! assert_eq!(cfg.get_by_getter("getMaxRequestSize")?.get::<i64>()?, 5_000_000);
//!
//! cfg.stub("max-request-size", PropertyValue::Integer(1024))?;
//! assert_eq!(cfg.get("max-request-size")?.get::<i64>()?, 1024);
//! assert_eq!(cfg.invocations("max-request-size"), 2);
//! # Ok::<(), cfgdefn::Error>(())
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::definition::PropertyDefinition;
use crate::error::{Error, Result};
use crate::registry::{DefinitionRegistry, ResolvedDefault};
use crate::sync::{MutexExt, RwLockExt};

/// Configuration object for one managed object type, answering with defaults
pub struct MockConfiguration {
    registry: DefinitionRegistry,
    managed_object_type: String,
    /// Stubbed values keyed by canonical property name
    stubs: RwLock<HashMap<String, ResolvedDefault>>,
    invocations: Mutex<HashMap<String, usize>>,
}

impl std::fmt::Debug for MockConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockConfiguration")
            .field("managed_object_type", &self.managed_object_type)
            .field("stubs", &*self.stubs.read_recovered())
            .finish_non_exhaustive()
    }
}

impl MockConfiguration {
    /// Create a mock for a registered managed object type
    ///
    /// # Errors
    ///
    /// Returns `Error::DefinitionNotFound` if the type is not registered.
    pub fn new(registry: &DefinitionRegistry, managed_object_type: &str) -> Result<Self> {
        let definition = registry.definition(managed_object_type)?;
        Ok(Self {
            registry: registry.clone(),
            managed_object_type: definition.name.clone(),
            stubs: RwLock::new(HashMap::new()),
            invocations: Mutex::new(HashMap::new()),
        })
    }

    /// Create a mock for the definition describing a configuration interface
    ///
    /// # Errors
    ///
    /// Returns `Error::DefinitionNotFound` if no definition matches the interface.
    pub fn for_interface(registry: &DefinitionRegistry, config_interface: &str) -> Result<Self> {
        let definition = registry.definition_for_interface(config_interface)?;
        Self::new(registry, &definition.name)
    }

    pub fn managed_object_type(&self) -> &str {
        &self.managed_object_type
    }

    /// Read a property: its stubbed value if any, otherwise its default
    ///
    /// # Errors
    ///
    /// Same as [`DefinitionRegistry::default_value_for`] for unstubbed properties.
    pub fn get(&self, property: &str) -> Result<ResolvedDefault> {
        let name = self
            .registry
            .property(&self.managed_object_type, property)?
            .name
            .clone();
        self.answer(name)
    }

    /// Read a property through its getter name, e.g. `getMaxRequestSize`
    ///
    /// # Errors
    ///
    /// Returns `Error::PropertyNotFound` if the getter matches no property,
    /// otherwise the same errors as [`get`](Self::get).
    pub fn get_by_getter(&self, getter: &str) -> Result<ResolvedDefault> {
        let name = self
            .registry
            .property_for_getter(&self.managed_object_type, getter)?
            .name
            .clone();
        self.answer(name)
    }

    /// Override the value returned for a property
    ///
    /// # Errors
    ///
    /// - `Error::PropertyNotFound` if the property does not exist
    /// - `Error::TypeMismatch` if the value's shape or type does not match
    ///   the property's multiplicity or syntax
    pub fn stub(&self, property: &str, value: impl Into<ResolvedDefault>) -> Result<()> {
        let definition = self.registry.property(&self.managed_object_type, property)?;
        let value = value.into();
        check_stub(definition, &value)?;

        log::debug!("Stubbing '{}' on '{}'", definition.name, self.managed_object_type);
        self.stubs
            .write_recovered()
            .insert(definition.name.clone(), value);
        Ok(())
    }

    /// Remove a stub, returning whether one was set
    pub fn reset(&self, property: &str) -> bool {
        self.stubs.write_recovered().remove(property).is_some()
    }

    /// Number of reads of a property so far, successful or not
    pub fn invocations(&self, property: &str) -> usize {
        self.invocations
            .lock_recovered()
            .get(property)
            .copied()
            .unwrap_or(0)
    }

    fn answer(&self, property: String) -> Result<ResolvedDefault> {
        *self
            .invocations
            .lock_recovered()
            .entry(property.clone())
            .or_insert(0) += 1;

        if let Some(stubbed) = self.stubs.read_recovered().get(&property) {
            return Ok(stubbed.clone());
        }
        self.registry
            .default_value_for(&self.managed_object_type, &property)
    }
}

fn check_stub(property: &PropertyDefinition, value: &ResolvedDefault) -> Result<()> {
    if value.is_multiple() != property.multi_valued {
        let (expected, actual) = if property.multi_valued {
            ("value set", "single value")
        } else {
            ("single value", "value set")
        };
        return Err(Error::TypeMismatch {
            key: property.name.clone(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    let expected = property.syntax.name();
    match value.values().into_iter().find(|v| v.type_name() != expected) {
        Some(other) => Err(Error::TypeMismatch {
            key: property.name.clone(),
            expected: expected.to_string(),
            actual: other.type_name().to_string(),
        }),
        None => Ok(()),
    }
}
