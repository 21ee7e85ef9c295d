// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute filter chain
//!
//! Each stage is an equality or membership test on a separate attribute, so
//! stages commute and only ever narrow the candidate set. Stages without a
//! predicate are skipped.

use bim_query_model::{Entity, LevelRef, NameFilters, VariantRef};
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;

/// A single narrowing stage of the chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterStage {
    /// Design variant membership
    Variant,
    /// Family/template name
    GroupingName,
    /// Type label
    DiscriminatorName,
    /// Level membership
    Level,
}

impl FilterStage {
    /// Canonical stage order
    pub const DEFAULT_ORDER: [FilterStage; 4] = [
        FilterStage::Variant,
        FilterStage::GroupingName,
        FilterStage::DiscriminatorName,
        FilterStage::Level,
    ];

    /// Id comparisons first, then the more selective of the name tests
    pub const SELECTIVE_ORDER: [FilterStage; 4] = [
        FilterStage::Variant,
        FilterStage::Level,
        FilterStage::DiscriminatorName,
        FilterStage::GroupingName,
    ];

    /// Get display name for logging
    pub fn name(&self) -> &'static str {
        match self {
            FilterStage::Variant => "design variant",
            FilterStage::GroupingName => "grouping name",
            FilterStage::DiscriminatorName => "discriminator name",
            FilterStage::Level => "level",
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved predicates for one query
///
/// Borrowed from the query being executed; the variant is already resolved
/// to a concrete reference.
#[derive(Clone, Debug, Default)]
pub struct FilterChain<'q> {
    variant: Option<VariantRef>,
    grouping_name: Option<&'q str>,
    discriminator_name: Option<&'q str>,
    levels: Option<&'q FxHashSet<LevelRef>>,
}

impl<'q> FilterChain<'q> {
    /// Create a chain with no predicates
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name predicates
    pub fn names(mut self, names: &'q NameFilters) -> Self {
        self.grouping_name = names.grouping_name.as_deref();
        self.discriminator_name = names.discriminator_name.as_deref();
        self
    }

    /// Set the resolved variant predicate
    pub fn variant(mut self, variant: Option<VariantRef>) -> Self {
        self.variant = variant;
        self
    }

    /// Set the level predicate
    pub fn levels(mut self, levels: Option<&'q FxHashSet<LevelRef>>) -> Self {
        self.levels = levels;
        self
    }

    /// Check if a stage has a predicate
    pub fn is_active(&self, stage: FilterStage) -> bool {
        match stage {
            FilterStage::Variant => self.variant.is_some(),
            FilterStage::GroupingName => self.grouping_name.is_some(),
            FilterStage::DiscriminatorName => self.discriminator_name.is_some(),
            FilterStage::Level => self.levels.is_some(),
        }
    }

    /// Check whether an entity passes one stage
    ///
    /// Missing attributes never match a present predicate: an entity without
    /// a grouping name fails any grouping filter, one without a level fails any
    /// level filter, and one outside every variant fails any variant filter.
    pub fn matches(&self, stage: FilterStage, entity: &Entity) -> bool {
        match stage {
            FilterStage::Variant => match self.variant {
                Some(variant) => entity.variant == Some(variant),
                None => true,
            },
            FilterStage::GroupingName => match self.grouping_name {
                Some(name) => entity.grouping_name.as_deref() == Some(name),
                None => true,
            },
            FilterStage::DiscriminatorName => match self.discriminator_name {
                Some(name) => entity.discriminator_name == name,
                None => true,
            },
            FilterStage::Level => match (self.levels, entity.level) {
                (Some(levels), Some(level)) => levels.contains(&level),
                (Some(_), None) => false,
                (None, _) => true,
            },
        }
    }

    /// Apply all active stages in canonical order
    pub fn apply(&self, candidates: Vec<Arc<Entity>>) -> Vec<Arc<Entity>> {
        self.apply_in_order(candidates, &FilterStage::DEFAULT_ORDER, false)
    }

    /// Apply active stages in the given order
    ///
    /// `order` must name each stage exactly once. With `trace` set, every
    /// executed stage logs its candidate counts at debug level.
    pub fn apply_in_order(
        &self,
        mut candidates: Vec<Arc<Entity>>,
        order: &[FilterStage; 4],
        trace: bool,
    ) -> Vec<Arc<Entity>> {
        debug_assert!(
            FilterStage::DEFAULT_ORDER
                .iter()
                .all(|stage| order.contains(stage)),
            "stage order {:?} does not cover every stage",
            order
        );
        for &stage in order {
            if !self.is_active(stage) {
                continue;
            }
            if candidates.is_empty() {
                break;
            }
            let before = candidates.len();
            candidates.retain(|entity| self.matches(stage, entity));
            if trace {
                log::debug!(
                    "{} filter: {} -> {} candidates",
                    stage,
                    before,
                    candidates.len()
                );
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim_query_model::Category;

    fn candidates() -> Vec<Arc<Entity>> {
        vec![
            Arc::new(
                Entity::instance(1, Category::Doors, "0915 x 2032mm")
                    .with_grouping_name("M_Single-Flush")
                    .on_level(100)
                    .in_variant(10),
            ),
            Arc::new(
                Entity::instance(2, Category::Doors, "0915 x 2134mm")
                    .with_grouping_name("M_Single-Flush")
                    .on_level(101)
                    .in_variant(10),
            ),
            Arc::new(
                Entity::instance(3, Category::Doors, "0915 x 2032mm")
                    .with_grouping_name("M_Double-Flush")
                    .on_level(100),
            ),
            // No family, no level
            Arc::new(Entity::instance(4, Category::Doors, "0915 x 2032mm")),
        ]
    }

    fn ids(entities: &[Arc<Entity>]) -> Vec<u32> {
        entities.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn test_empty_chain_keeps_everything() {
        let result = FilterChain::new().apply(candidates());
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_variant_filter() {
        let chain = FilterChain::new().variant(Some(VariantRef::from(10)));
        assert_eq!(ids(&chain.apply(candidates())), vec![1, 2]);
    }

    #[test]
    fn test_unassigned_never_matches_variant() {
        let chain = FilterChain::new().variant(Some(VariantRef::from(11)));
        assert!(chain.apply(candidates()).is_empty());
    }

    #[test]
    fn test_grouping_name_exact_match() {
        let names = NameFilters {
            grouping_name: Some("M_Single-Flush".into()),
            discriminator_name: None,
        };
        let chain = FilterChain::new().names(&names);
        assert_eq!(ids(&chain.apply(candidates())), vec![1, 2]);

        // Case-sensitive, no partial matches
        for name in ["m_single-flush", "Single", "M_Single-Flush "] {
            let names = NameFilters {
                grouping_name: Some(name.into()),
                discriminator_name: None,
            };
            assert!(FilterChain::new().names(&names).apply(candidates()).is_empty());
        }
    }

    #[test]
    fn test_discriminator_name() {
        let names = NameFilters {
            grouping_name: None,
            discriminator_name: Some("0915 x 2032mm".into()),
        };
        let chain = FilterChain::new().names(&names);
        assert_eq!(ids(&chain.apply(candidates())), vec![1, 3, 4]);
    }

    #[test]
    fn test_level_membership() {
        let levels: FxHashSet<LevelRef> = [LevelRef::from(100)].into_iter().collect();
        let chain = FilterChain::new().levels(Some(&levels));
        assert_eq!(ids(&chain.apply(candidates())), vec![1, 3]);

        let empty = FxHashSet::default();
        let chain = FilterChain::new().levels(Some(&empty));
        assert!(chain.apply(candidates()).is_empty());
    }

    #[test]
    fn test_combined_stages() {
        let names = NameFilters {
            grouping_name: Some("M_Single-Flush".into()),
            discriminator_name: Some("0915 x 2032mm".into()),
        };
        let levels: FxHashSet<LevelRef> = [LevelRef::from(100), LevelRef::from(101)]
            .into_iter()
            .collect();
        let chain = FilterChain::new()
            .names(&names)
            .levels(Some(&levels))
            .variant(Some(VariantRef::from(10)));

        assert_eq!(ids(&chain.apply(candidates())), vec![1]);
        let selective = chain.apply_in_order(candidates(), &FilterStage::SELECTIVE_ORDER, true);
        assert_eq!(ids(&selective), vec![1]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not cover every stage")]
    fn test_order_with_repeated_stage_panics() {
        let chain = FilterChain::new();
        let order = [
            FilterStage::Variant,
            FilterStage::Variant,
            FilterStage::GroupingName,
            FilterStage::DiscriminatorName,
        ];
        chain.apply_in_order(candidates(), &order, false);
    }

    #[test]
    fn test_is_active() {
        let chain = FilterChain::new().variant(Some(VariantRef::from(1)));
        assert!(chain.is_active(FilterStage::Variant));
        assert!(!chain.is_active(FilterStage::Level));
        assert!(!chain.is_active(FilterStage::GroupingName));
    }
}
