//! Static configuration metadata
//!
//! This module contains the building blocks of the metadata model:
//! - `ManagedObjectDefinition` - One class of configuration and its properties
//! - `PropertyDefinition` - One setting: syntax, default behavior, multiplicity
//! - `DefaultBehavior` - The declared rule for computing a setting's default
//! - `PropertySyntax` / `PropertyValue` - Decoding literals into typed values

mod behavior;
mod managed_object;
mod property;
mod syntax;
mod value;

pub use behavior::{DefaultBehavior, UnresolvedKind};
pub use managed_object::{ManagedObject, ManagedObjectDefinition};
pub use property::PropertyDefinition;
pub use syntax::{DecodeError, DurationUnit, PropertySyntax, UNLIMITED, ValueDecoder};
pub use value::{EnumValue, PropertyValue};
