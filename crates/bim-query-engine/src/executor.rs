// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Query execution

use crate::filter::{FilterChain, FilterStage};
use crate::scanner::CategoryScanner;
use crate::variant::VariantResolver;
use bim_query_model::{Entity, EntityStore, InstanceQuery, Query, Result, Role, TypeQuery};
use std::sync::Arc;

/// Query executor
///
/// Runs scan, variant resolution and the attribute filter chain for a query.
/// Execution is synchronous and reads the store exactly once per call; the
/// call either returns the full result or an error.
#[derive(Clone, Debug, Default)]
pub struct QueryExecutor {
    /// Log candidate counts after every filter stage
    pub trace_stages: bool,
    /// Run id comparisons before name comparisons
    pub selective_order: bool,
}

impl QueryExecutor {
    /// Create a new executor with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to log per-stage candidate counts
    pub fn with_stage_tracing(mut self, enabled: bool) -> Self {
        self.trace_stages = enabled;
        self
    }

    /// Set whether to reorder stages for selectivity
    ///
    /// Results are identical either way.
    pub fn with_selective_order(mut self, enabled: bool) -> Self {
        self.selective_order = enabled;
        self
    }

    /// Execute a query of either role
    ///
    /// # Errors
    /// [`bim_query_model::QueryError::UnresolvedVariant`] if an instance query
    /// asks for the active variant and the store has none.
    pub fn execute(&self, store: &dyn EntityStore, query: &Query) -> Result<Vec<Arc<Entity>>> {
        match query {
            Query::Instance(q) => self.execute_instances(store, q),
            Query::TypeDefinition(q) => Ok(self.execute_types(store, q)),
        }
    }

    /// Execute an instance query
    pub fn execute_instances(
        &self,
        store: &dyn EntityStore,
        query: &InstanceQuery,
    ) -> Result<Vec<Arc<Entity>>> {
        let candidates = CategoryScanner::scan(store, &query.category, Role::Instance);
        let variant = VariantResolver::resolve(store, &query.variant_mode)?;

        let chain = FilterChain::new()
            .variant(variant)
            .names(&query.names)
            .levels(query.levels.as_ref());
        let scanned = candidates.len();
        let results = chain.apply_in_order(candidates, self.order(), self.trace_stages);

        log::debug!(
            "Instance query on {}: {} of {} candidates matched",
            query.category,
            results.len(),
            scanned
        );
        Ok(results)
    }

    /// Execute a type-definition query
    ///
    /// Only the name predicates exist for type definitions, so this cannot fail.
    pub fn execute_types(&self, store: &dyn EntityStore, query: &TypeQuery) -> Vec<Arc<Entity>> {
        let candidates = CategoryScanner::scan(store, &query.category, Role::TypeDefinition);

        let chain = FilterChain::new().names(&query.names);
        let scanned = candidates.len();
        let results = chain.apply_in_order(candidates, self.order(), self.trace_stages);

        log::debug!(
            "Type query on {}: {} of {} candidates matched",
            query.category,
            results.len(),
            scanned
        );
        results
    }

    fn order(&self) -> &'static [FilterStage; 4] {
        if self.selective_order {
            &FilterStage::SELECTIVE_ORDER
        } else {
            &FilterStage::DEFAULT_ORDER
        }
    }
}
