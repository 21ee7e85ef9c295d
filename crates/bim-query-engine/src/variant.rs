// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Design variant resolution
//!
//! The "use the active variant" default lives here and nowhere else. Filtering
//! code only ever sees a concrete [`VariantRef`] or no variant predicate.

use bim_query_model::{EntityStore, QueryError, Result, VariantMode, VariantRef};

/// Resolves a [`VariantMode`] against a store
pub struct VariantResolver;

impl VariantResolver {
    /// Resolve the variant predicate for an instance query
    ///
    /// # Returns
    /// - `Ok(None)` for [`VariantMode::Unfiltered`]
    /// - `Ok(Some(active))` for [`VariantMode::ActiveOnly`]
    /// - `Ok(Some(r))` for [`VariantMode::Specific`], unchanged and unvalidated
    ///
    /// # Errors
    /// [`QueryError::UnresolvedVariant`] if `ActiveOnly` is requested and the
    /// store has no active variant.
    pub fn resolve(store: &dyn EntityStore, mode: &VariantMode) -> Result<Option<VariantRef>> {
        match mode {
            VariantMode::Unfiltered => Ok(None),
            VariantMode::ActiveOnly => match store.active_variant() {
                Some(active) => {
                    log::trace!("Resolved active design {}", active);
                    Ok(Some(active))
                }
                None => {
                    log::warn!("Active design variant requested but none is active");
                    Err(QueryError::UnresolvedVariant)
                }
            },
            VariantMode::Specific(variant) => Ok(Some(*variant)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_unfiltered() {
        let store = MemoryStore::empty();
        assert_eq!(
            VariantResolver::resolve(&store, &VariantMode::Unfiltered),
            Ok(None)
        );
    }

    #[test]
    fn test_active_only() {
        let store = MemoryStore::builder().active_variant(7u32).build();
        assert_eq!(
            VariantResolver::resolve(&store, &VariantMode::ActiveOnly),
            Ok(Some(VariantRef::from(7)))
        );
    }

    #[test]
    fn test_active_only_without_active_variant() {
        let store = MemoryStore::empty();
        assert_eq!(
            VariantResolver::resolve(&store, &VariantMode::ActiveOnly),
            Err(QueryError::UnresolvedVariant)
        );
    }

    #[test]
    fn test_specific_is_not_validated() {
        // Variant 99 does not exist; resolution passes it through untouched
        let store = MemoryStore::builder().active_variant(7u32).build();
        let mode = VariantMode::Specific(VariantRef::from(99));
        assert_eq!(
            VariantResolver::resolve(&store, &mode),
            Ok(Some(VariantRef::from(99)))
        );
    }
}
