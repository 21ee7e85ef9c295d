// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Category-specific narrowing of query results
//!
//! Query engines return plain [`Entity`] records. Consumers that want a
//! category-shaped record implement [`EntityView`] and narrow the results.

use crate::{Category, Entity};
use std::sync::Arc;

/// A typed view over entities of one category
///
/// # Example
///
/// ```ignore
/// struct Wall(Arc<Entity>);
///
/// impl EntityView for Wall {
///     const CATEGORY: Category = Category::Walls;
///
///     fn wrap(entity: Arc<Entity>) -> Self {
///         Wall(entity)
///     }
/// }
///
/// let walls: Vec<Wall> = narrow(&results);
/// ```
pub trait EntityView: Sized {
    /// Category this view accepts
    const CATEGORY: Category;

    /// Wrap an entity already known to be of [`Self::CATEGORY`]
    fn wrap(entity: Arc<Entity>) -> Self;

    /// Wrap an entity if its category matches
    fn try_view(entity: &Arc<Entity>) -> Option<Self> {
        (entity.category == Self::CATEGORY).then(|| Self::wrap(Arc::clone(entity)))
    }
}

/// Narrow a result set to a typed view, dropping entities of other categories
pub fn narrow<V: EntityView>(entities: &[Arc<Entity>]) -> Vec<V> {
    entities.iter().filter_map(V::try_view).collect()
}
