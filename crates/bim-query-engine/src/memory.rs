// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory EntityStore implementation

use bim_query_model::{
    Category, Entity, EntityId, EntityStore, Level, QueryError, Result, Role, VariantGroup,
    VariantRef,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serializable snapshot of a model
///
/// ```json
/// {
///   "levels": [{ "id": 1, "name": "Level 1", "elevation": 0.0 }],
///   "variants": [{ "id": 2, "name": "Option 1" }],
///   "active_variant": 2,
///   "entities": [
///     { "id": 10, "category": "walls", "role": "instance",
///       "discriminator_name": "Generic - 200mm", "level": 1, "variant": 2 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Levels of the model
    #[serde(default)]
    pub levels: Vec<Level>,
    /// Design variant groups
    #[serde(default)]
    pub variants: Vec<VariantGroup>,
    /// Active variant, if any
    #[serde(default)]
    pub active_variant: Option<VariantRef>,
    /// Entities in insertion order
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// In-memory model store
///
/// Entities are kept in insertion order with a category index for scans.
pub struct MemoryStore {
    /// Entities in insertion order
    entities: Vec<Arc<Entity>>,
    /// Entity ID -> position
    id_index: FxHashMap<EntityId, usize>,
    /// Category -> positions (ascending)
    category_index: FxHashMap<Category, Vec<usize>>,
    /// Levels
    levels: Vec<Level>,
    /// Design variant groups
    variants: Vec<VariantGroup>,
    /// Active variant
    active_variant: Option<VariantRef>,
}

impl MemoryStore {
    /// Start building a store
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }

    /// Create an empty store
    pub fn empty() -> Self {
        MemoryStoreBuilder::default().build()
    }

    /// Load a store from a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot =
            serde_json::from_str(json).map_err(|e| QueryError::snapshot(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// Create a store from a snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let mut builder = MemoryStoreBuilder::default();
        for level in snapshot.levels {
            builder = builder.level(level)?;
        }
        for variant in snapshot.variants {
            builder = builder.variant_group(variant)?;
        }
        if let Some(active) = snapshot.active_variant {
            builder = builder.active_variant(active);
        }
        for entity in snapshot.entities {
            builder = builder.entity(entity)?;
        }
        Ok(builder.build())
    }

    /// Export the store as a snapshot
    pub fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            levels: self.levels.clone(),
            variants: self.variants.clone(),
            active_variant: self.active_variant,
            entities: self.entities.iter().map(|e| (**e).clone()).collect(),
        }
    }

    /// Get entity by ID
    pub fn get(&self, id: EntityId) -> Option<Arc<Entity>> {
        self.id_index
            .get(&id)
            .map(|&pos| Arc::clone(&self.entities[pos]))
    }

    /// Get total entity count
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get all levels
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Get all design variant groups
    pub fn variant_groups(&self) -> &[VariantGroup] {
        &self.variants
    }

    /// Find a level by exact name
    pub fn level_by_name(&self, name: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.name == name)
    }

    /// Find a design variant group by exact name
    pub fn variant_by_name(&self, name: &str) -> Option<&VariantGroup> {
        self.variants.iter().find(|v| v.name == name)
    }
}

impl EntityStore for MemoryStore {
    fn scan_by_category(&self, category: &Category, role: Role) -> Vec<Arc<Entity>> {
        self.category_index
            .get(category)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&pos| &self.entities[pos])
                    .filter(|e| e.role == role)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn active_variant(&self) -> Option<VariantRef> {
        self.active_variant
    }
}

/// Builder for [`MemoryStore`]
#[derive(Default)]
pub struct MemoryStoreBuilder {
    entities: Vec<Arc<Entity>>,
    ids: FxHashSet<EntityId>,
    levels: Vec<Level>,
    variants: Vec<VariantGroup>,
    active_variant: Option<VariantRef>,
}

impl MemoryStoreBuilder {
    /// Add a level
    ///
    /// Fails if another level already uses its id.
    pub fn level(mut self, level: Level) -> Result<Self> {
        if self.levels.iter().any(|l| l.id == level.id) {
            return Err(QueryError::DuplicateLevel(level.id));
        }
        self.levels.push(level);
        Ok(self)
    }

    /// Add a design variant group
    ///
    /// Fails if another group already uses its id.
    pub fn variant_group(mut self, variant: VariantGroup) -> Result<Self> {
        if self.variants.iter().any(|v| v.id == variant.id) {
            return Err(QueryError::DuplicateVariant(variant.id));
        }
        self.variants.push(variant);
        Ok(self)
    }

    /// Set the active design variant
    ///
    /// The reference is not required to name a registered variant group.
    pub fn active_variant(mut self, variant: impl Into<VariantRef>) -> Self {
        self.active_variant = Some(variant.into());
        self
    }

    /// Add an entity
    ///
    /// Fails if the entity violates the role invariants or reuses an id. An
    /// `Other` category spelling a built-in one is stored as that category.
    pub fn entity(mut self, mut entity: Entity) -> Result<Self> {
        entity.validate()?;
        entity.category = entity.category.canonical();
        if !self.ids.insert(entity.id) {
            return Err(QueryError::DuplicateEntity(entity.id));
        }
        self.entities.push(Arc::new(entity));
        Ok(self)
    }

    /// Add several entities
    pub fn entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Result<Self> {
        for entity in entities {
            self = self.entity(entity)?;
        }
        Ok(self)
    }

    /// Build the store and its indices
    pub fn build(self) -> MemoryStore {
        let mut id_index = FxHashMap::default();
        let mut category_index: FxHashMap<Category, Vec<usize>> = FxHashMap::default();
        for (pos, entity) in self.entities.iter().enumerate() {
            id_index.insert(entity.id, pos);
            category_index
                .entry(entity.category.clone())
                .or_default()
                .push(pos);
        }

        log::debug!(
            "Built model store: {} entities, {} categories, {} levels, {} variants",
            self.entities.len(),
            category_index.len(),
            self.levels.len(),
            self.variants.len()
        );

        MemoryStore {
            entities: self.entities,
            id_index,
            category_index,
            levels: self.levels,
            variants: self.variants,
            active_variant: self.active_variant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SNAPSHOT: &str = r#"{
        "levels": [
            { "id": 1, "name": "Level 1", "elevation": 0.0 },
            { "id": 2, "name": "Level 2", "elevation": 3.5 }
        ],
        "variants": [
            { "id": 3, "name": "Option 1" },
            { "id": 4, "name": "Option 2" }
        ],
        "active_variant": 3,
        "entities": [
            { "id": 10, "category": "walls", "role": "instance",
              "grouping_name": "Basic Wall", "discriminator_name": "Generic - 200mm",
              "level": 1, "variant": 3 },
            { "id": 11, "category": "doors", "role": "instance",
              "grouping_name": "M_Single-Flush", "discriminator_name": "0915 x 2032mm",
              "level": 1 },
            { "id": 12, "category": "walls", "role": "type_definition",
              "grouping_name": "Basic Wall", "discriminator_name": "Generic - 200mm" },
            { "id": 13, "category": "walls", "role": "instance",
              "grouping_name": "Basic Wall", "discriminator_name": "Generic - 300mm",
              "level": 2, "variant": 4 }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let store = MemoryStore::from_json(TEST_SNAPSHOT).unwrap();

        assert_eq!(store.entity_count(), 4);
        assert_eq!(store.levels().len(), 2);
        assert_eq!(store.active_variant(), Some(VariantRef::from(3)));
        assert_eq!(store.variant_by_name("Option 2").map(|v| v.id), Some(VariantRef::from(4)));
        assert_eq!(store.level_by_name("Level 2").map(|l| l.elevation), Some(3.5));
    }

    #[test]
    fn test_scan_keeps_insertion_order_and_role() {
        let store = MemoryStore::from_json(TEST_SNAPSHOT).unwrap();

        let walls = store.scan_by_category(&Category::Walls, Role::Instance);
        let ids: Vec<_> = walls.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![10, 13]);

        let wall_types = store.scan_by_category(&Category::Walls, Role::TypeDefinition);
        assert_eq!(wall_types.len(), 1);
        assert_eq!(wall_types[0].id, EntityId(12));
    }

    #[test]
    fn test_scan_unknown_category() {
        let store = MemoryStore::from_json(TEST_SNAPSHOT).unwrap();
        assert!(store
            .scan_by_category(&Category::Roofs, Role::Instance)
            .is_empty());
    }

    #[test]
    fn test_get() {
        let store = MemoryStore::from_json(TEST_SNAPSHOT).unwrap();
        let door = store.get(EntityId(11)).unwrap();
        assert_eq!(door.category, Category::Doors);
        assert!(store.get(EntityId(99)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = MemoryStore::builder()
            .entity(Entity::instance(1, Category::Walls, "A"))
            .and_then(|b| b.entity(Entity::instance(1, Category::Doors, "B")));
        assert_eq!(result.err(), Some(QueryError::DuplicateEntity(EntityId(1))));
    }

    #[test]
    fn test_duplicate_level_rejected() {
        let result = MemoryStore::builder()
            .level(Level::new(1, "Level 1", 0.0))
            .and_then(|b| b.level(Level::new(1, "Level 1 copy", 3.0)));
        assert_eq!(
            result.err(),
            Some(QueryError::DuplicateLevel(bim_query_model::LevelRef::from(1)))
        );
    }

    #[test]
    fn test_duplicate_variant_rejected() {
        let json = r#"{ "variants": [
            { "id": 3, "name": "Option 1" },
            { "id": 3, "name": "Option 2" }
        ] }"#;
        assert_eq!(
            MemoryStore::from_json(json).err(),
            Some(QueryError::DuplicateVariant(VariantRef::from(3)))
        );
    }

    #[test]
    fn test_other_category_stored_canonically() {
        let store = MemoryStore::builder()
            .entity(Entity::instance(1, Category::Other("Walls".into()), "Generic - 200mm"))
            .unwrap()
            .build();
        assert_eq!(store.get(EntityId(1)).map(|e| e.category.clone()), Some(Category::Walls));
        assert_eq!(store.scan_by_category(&Category::Walls, Role::Instance).len(), 1);
    }

    #[test]
    fn test_type_definition_with_level_rejected() {
        let json = r#"{ "entities": [
            { "id": 1, "category": "floors", "role": "type_definition",
              "discriminator_name": "Generic Floor - 200mm", "level": 5 }
        ] }"#;
        assert!(matches!(
            MemoryStore::from_json(json),
            Err(QueryError::InvalidEntity { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            MemoryStore::from_json("{ not json"),
            Err(QueryError::Snapshot(_))
        ));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let store = MemoryStore::from_json(TEST_SNAPSHOT).unwrap();
        let again = MemoryStore::from_snapshot(store.to_snapshot()).unwrap();
        assert_eq!(again.to_snapshot(), store.to_snapshot());
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::empty();
        assert_eq!(store.entity_count(), 0);
        assert!(store.active_variant().is_none());
    }
}
