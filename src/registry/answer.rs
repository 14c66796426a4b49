//! Shaping resolved defaults into the form callers expect

use std::collections::BTreeSet;

use crate::definition::{PropertyDefinition, PropertyValue};
use crate::error::{Error, NoDefaultReason, Result};
use crate::resolver::DefaultResolution;

/// Default value of a property, shaped by its multiplicity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDefault {
    /// Default of a single-valued property
    Single(PropertyValue),
    /// Default of a multi-valued property, naturally ordered
    Multiple(BTreeSet<PropertyValue>),
}

impl ResolvedDefault {
    pub fn as_single(&self) -> Option<&PropertyValue> {
        match self {
            ResolvedDefault::Single(value) => Some(value),
            ResolvedDefault::Multiple(_) => None,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, ResolvedDefault::Multiple(_))
    }

    /// All values in natural order
    pub fn values(&self) -> Vec<&PropertyValue> {
        match self {
            ResolvedDefault::Single(value) => vec![value],
            ResolvedDefault::Multiple(values) => values.iter().collect(),
        }
    }

    pub fn into_values(self) -> BTreeSet<PropertyValue> {
        match self {
            ResolvedDefault::Single(value) => BTreeSet::from([value]),
            ResolvedDefault::Multiple(values) => values,
        }
    }

    /// Convert a single value into a Rust type
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` for multi-valued defaults or when the
    /// value's type does not convert into `T`.
    pub fn get<T>(self) -> Result<T>
    where
        T: TryFrom<PropertyValue, Error = Error>,
    {
        match self {
            ResolvedDefault::Single(value) => T::try_from(value),
            ResolvedDefault::Multiple(values) => Err(Error::TypeMismatch {
                key: "resolved default".to_string(),
                expected: "single value".to_string(),
                actual: format!("set of {} values", values.len()),
            }),
        }
    }
}

impl From<PropertyValue> for ResolvedDefault {
    fn from(value: PropertyValue) -> Self {
        ResolvedDefault::Single(value)
    }
}

impl From<BTreeSet<PropertyValue>> for ResolvedDefault {
    fn from(values: BTreeSet<PropertyValue>) -> Self {
        ResolvedDefault::Multiple(values)
    }
}

/// Reduce a resolution to the shape the property declares
///
/// Multi-valued properties get the whole set, even when empty. Single-valued
/// properties get the first value in natural order.
pub(crate) fn shape(
    property: &PropertyDefinition,
    resolution: DefaultResolution<PropertyValue>,
) -> Result<ResolvedDefault> {
    let values = match resolution {
        DefaultResolution::Resolved(values) => values,
        DefaultResolution::Unresolved(kind) => {
            return Err(Error::NoDefaultValue {
                property: property.name.clone(),
                reason: NoDefaultReason::Unresolved(kind),
            });
        }
    };

    if property.multi_valued {
        return Ok(ResolvedDefault::Multiple(values));
    }

    if values.len() > 1 {
        log::debug!(
            "Single-valued property '{}' declares {} default values, using the first",
            property.name,
            values.len()
        );
    }
    values
        .into_iter()
        .next()
        .map(ResolvedDefault::Single)
        .ok_or_else(|| Error::NoDefaultValue {
            property: property.name.clone(),
            reason: NoDefaultReason::Empty,
        })
}
