// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read interface of a model store

use crate::{Category, Entity, Role, VariantRef};
use std::sync::Arc;

/// Read-only access to a model snapshot
///
/// Stores own their entities and variant groups. Query engines only read
/// through this trait and never mutate the store. Callers must not mutate a
/// store while a query runs against it.
///
/// # Example
///
/// ```ignore
/// use bim_query_model::{Category, EntityStore, Role};
///
/// fn count_walls(store: &dyn EntityStore) -> usize {
///     store.scan_by_category(&Category::Walls, Role::Instance).len()
/// }
/// ```
pub trait EntityStore: Send + Sync {
    /// Get every entity of a category and role
    ///
    /// Entities are returned in the store's insertion order. An unknown
    /// category yields an empty vector.
    fn scan_by_category(&self, category: &Category, role: Role) -> Vec<Arc<Entity>>;

    /// Get the currently active design variant
    ///
    /// # Returns
    /// `None` if no variant is active
    fn active_variant(&self) -> Option<VariantRef>;
}
