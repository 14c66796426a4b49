//! Process-wide definition registry
//!
//! Metadata is registered once at startup with [`install`]; afterwards
//! [`default_value_for`] can be called from any thread without further
//! synchronization.

use std::sync::OnceLock;

use super::{DefinitionRegistry, ResolvedDefault};
use crate::error::{Error, Result};

static REGISTRY: OnceLock<DefinitionRegistry> = OnceLock::new();

/// Install the process-wide registry
///
/// # Errors
///
/// Returns `Error::RegistryAlreadyInstalled` if a registry was installed before.
pub fn install(registry: DefinitionRegistry) -> Result<()> {
    REGISTRY
        .set(registry)
        .map_err(|_| Error::RegistryAlreadyInstalled)?;
    log::info!("Installed process-wide definition registry");
    Ok(())
}

/// Get the process-wide registry
///
/// # Errors
///
/// Returns `Error::NotInitialized` if [`install`] has not been called.
pub fn registry() -> Result<&'static DefinitionRegistry> {
    REGISTRY.get().ok_or(Error::NotInitialized)
}

/// Default value of a property, resolved against the process-wide registry
///
/// # Errors
///
/// `Error::NotInitialized` if no registry is installed, otherwise the same
/// errors as [`DefinitionRegistry::default_value_for`].
pub fn default_value_for(managed_object_type: &str, property: &str) -> Result<ResolvedDefault> {
    registry()?.default_value_for(managed_object_type, property)
}

/// Default value behind a configuration interface getter, resolved against
/// the process-wide registry
///
/// # Errors
///
/// `Error::NotInitialized` if no registry is installed, otherwise the same
/// errors as [`DefinitionRegistry::default_value_for_interface`].
pub fn default_value_for_interface(config_interface: &str, getter: &str) -> Result<ResolvedDefault> {
    registry()?.default_value_for_interface(config_interface, getter)
}
