//! # cfgdefn - Configuration Definition Defaults
//!
//! Resolves the *default value* of a configuration property from static
//! configuration metadata, without a live configuration object.
//!
//! ## Features
//!
//! - **Metadata Model**: Managed object definitions with typed property definitions
//! - **Default Behaviors**: Defined literals, aliases, absolute/relative inheritance, undefined
//! - **Typed Decoding**: Boolean, integer, size, duration, string, enumeration and DN syntaxes
//! - **Registry**: Built once, immutable, shareable across threads
//! - **Mock Configurations**: Getter-style access answering with defaults, stubbable per property
//! - **Metadata Documents**: Load definitions from JSON, TOML (`toml`) or YAML (`yaml`)
//! - **Derive Macro**: Generate definitions from annotated structs (`derive`)
//!
//! ## Quick Start
//!
//! ```rust
//! use cfgdefn::{DefinitionRegistry, ManagedObjectDefinition, PropertyDefinition, PropertyValue};
//!
//! let registry = DefinitionRegistry::builder()
//!     .register(
//!         ManagedObjectDefinition::new("ldap-connection-handler")
//!             .property(PropertyDefinition::integer("max-request-size").default_values(["5000000"]))
//!             .property(
//!                 PropertyDefinition::enumeration("log-level", ["DEBUG", "INFO", "WARN"])
//!                     .multi_valued()
//!                     .default_values(["WARN", "INFO", "INFO"]),
//!             )
//!             .property(PropertyDefinition::dn("parent-dn").relative_inherited(1, "base-dn")),
//!     )
//!     .build()?;
//!
//! // Single-valued property: one value
//! let size = registry.default_value_for("ldap-connection-handler", "max-request-size")?;
//! assert_eq!(size.get::<i64>()?, 5_000_000);
//!
//! // Multi-valued property: naturally ordered set, duplicates collapsed
//! let levels = registry.default_value_for("ldap-connection-handler", "log-level")?;
//! let names: Vec<&str> = levels.values().into_iter().filter_map(PropertyValue::as_str).collect();
//! assert_eq!(names, ["INFO", "WARN"]);
//!
//! // Inherited defaults need live configuration state
//! let err = registry.default_value_for("ldap-connection-handler", "parent-dn").unwrap_err();
//! assert!(err.is_no_default());
//! # Ok::<(), cfgdefn::Error>(())
//! ```
//!
//! ## Error Kinds
//!
//! | Error | Meaning |
//! |-------|---------|
//! | `DefinitionNotFound` | No definition registered for the managed object type |
//! | `PropertyNotFound` | The definition has no such property |
//! | `MalformedDefault` | A declared default literal does not decode (metadata defect) |
//! | `NoDefaultValue` | No statically resolvable default (expected for many properties) |
//!
//! ## Process-wide Registry
//!
//! ```rust,no_run
//! use cfgdefn::{DefinitionRegistry, global};
//!
//! # fn example() -> cfgdefn::Result<()> {
//! global::install(DefinitionRegistry::builder().load_json("metadata.json")?.build()?)?;
//!
//! let default = global::default_value_for("ldap-connection-handler", "max-request-size")?;
//! # Ok(())
//! # }
//! ```

// Core modules
mod docs;
mod error;
pub mod loader;
mod mock;
pub mod naming;
pub mod resolver;
mod sync;

// Grouped modules
pub mod definition;
pub mod registry;

// Re-exports from core
pub use docs::{DocsConfig, generate_docs};
pub use error::{Error, NoDefaultReason, Result};
pub use mock::MockConfiguration;
pub use registry::{DefinitionRegistry, DefinitionRegistryBuilder, ResolvedDefault, global};
pub use resolver::{DefaultResolution, resolve};

// Re-exports from definition
pub use definition::{
    DecodeError, DefaultBehavior, DurationUnit, EnumValue, ManagedObject,
    ManagedObjectDefinition, PropertyDefinition, PropertySyntax, PropertyValue, UnresolvedKind,
    ValueDecoder,
};

// Derive macro re-export (requires `derive` feature)
/// Derive macro for generating `ManagedObject` implementations.
///
/// # Example
///
/// ```rust,ignore
/// use cfgdefn::DeriveManagedObject;
///
/// #[derive(DeriveManagedObject)]
/// #[managed_object(name = "ldap-connection-handler")]
/// struct LdapConnectionHandlerCfg {
///     #[property(default = "5000000")]
///     max_request_size: i64,
/// }
/// ```
#[cfg(feature = "derive")]
pub use cfgdefn_derive::ManagedObject as DeriveManagedObject;
