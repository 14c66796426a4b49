//! Default behavior resolution
//!
//! [`resolve`] interprets a property's [`DefaultBehavior`] using the
//! property's decoder. Defined literals are decoded one by one and collected
//! into a set ordered by the value type's natural ordering; duplicates
//! collapse. Aliased, inherited and undefined defaults need live
//! configuration state and are reported as [`DefaultResolution::Unresolved`].

use std::collections::BTreeSet;

use crate::definition::{DecodeError, DefaultBehavior, UnresolvedKind, ValueDecoder};

/// Outcome of resolving a default behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultResolution<T: Ord> {
    /// Decoded default values, possibly empty
    Resolved(BTreeSet<T>),
    /// The behavior cannot be followed from static metadata
    Unresolved(UnresolvedKind),
}

impl<T: Ord> DefaultResolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, DefaultResolution::Resolved(_))
    }

    /// Resolved values, or `None` when unresolved
    pub fn into_values(self) -> Option<BTreeSet<T>> {
        match self {
            DefaultResolution::Resolved(values) => Some(values),
            DefaultResolution::Unresolved(_) => None,
        }
    }
}

/// Resolve a default behavior with the given decoder
///
/// # Errors
///
/// Returns the first [`DecodeError`] raised by a defined literal. No partial
/// result is returned in that case.
pub fn resolve<D: ValueDecoder>(
    behavior: &DefaultBehavior,
    decoder: &D,
) -> Result<DefaultResolution<D::Value>, DecodeError> {
    let resolution = match behavior {
        DefaultBehavior::Defined { values } => {
            let mut decoded = BTreeSet::new();
            for literal in values {
                log::trace!("Decoding default literal '{literal}'");
                decoded.insert(decoder.decode(literal)?);
            }
            DefaultResolution::Resolved(decoded)
        }
        DefaultBehavior::AliasOf { property } => DefaultResolution::Unresolved(UnresolvedKind::Alias {
            property: property.clone(),
        }),
        DefaultBehavior::AbsoluteInherited { path, property } => {
            DefaultResolution::Unresolved(UnresolvedKind::AbsoluteInherited {
                path: path.clone(),
                property: property.clone(),
            })
        }
        DefaultBehavior::RelativeInherited { offset, property } => {
            DefaultResolution::Unresolved(UnresolvedKind::RelativeInherited {
                offset: *offset,
                property: property.clone(),
            })
        }
        DefaultBehavior::Undefined => DefaultResolution::Unresolved(UnresolvedKind::Undefined),
    };
    Ok(resolution)
}
