// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! First-stage category scan

use bim_query_model::{Category, Entity, EntityStore, Role};
use std::sync::Arc;

/// Unfiltered candidate selection by category and role
pub struct CategoryScanner;

impl CategoryScanner {
    /// Get every entity of `category` with `role`, in store order
    ///
    /// Never fails; an unknown category yields no candidates. An `Other`
    /// category spelling a built-in one scans that built-in category.
    pub fn scan(store: &dyn EntityStore, category: &Category, role: Role) -> Vec<Arc<Entity>> {
        let category = &category.canonical();
        let candidates = store.scan_by_category(category, role);
        log::trace!(
            "Scanned {} {} candidates of {}",
            candidates.len(),
            role,
            category
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn test_store() -> MemoryStore {
        MemoryStore::builder()
            .entities([
                Entity::instance(1, Category::Walls, "Generic - 200mm"),
                Entity::type_definition(2, Category::Walls, "Generic - 200mm"),
                Entity::instance(3, Category::Doors, "0915 x 2032mm"),
                Entity::instance(4, Category::Walls, "Generic - 300mm"),
            ])
            .unwrap()
            .build()
    }

    #[test]
    fn test_scan_instances() {
        let store = test_store();
        let walls = CategoryScanner::scan(&store, &Category::Walls, Role::Instance);
        let ids: Vec<u32> = walls.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_scan_types() {
        let store = test_store();
        let types = CategoryScanner::scan(&store, &Category::Walls, Role::TypeDefinition);
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].role, Role::TypeDefinition);
    }

    #[test]
    fn test_scan_unmatched_category() {
        let store = test_store();
        let other = Category::Other("Parking".into());
        assert!(CategoryScanner::scan(&store, &other, Role::Instance).is_empty());
        assert!(CategoryScanner::scan(&store, &Category::Doors, Role::TypeDefinition).is_empty());
    }

    #[test]
    fn test_scan_other_spelling_of_builtin() {
        let store = MemoryStore::builder()
            .entities([
                Entity::instance(1, Category::Walls, "Generic - 200mm"),
                Entity::instance(2, Category::Other("OST_Walls".into()), "Generic - 300mm"),
            ])
            .unwrap()
            .build();

        for category in [Category::Walls, Category::Other("Walls".into())] {
            let walls = CategoryScanner::scan(&store, &category, Role::Instance);
            let ids: Vec<u32> = walls.iter().map(|e| e.id.0).collect();
            assert_eq!(ids, vec![1, 2]);
        }
    }
}
