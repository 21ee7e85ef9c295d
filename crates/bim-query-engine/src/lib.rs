// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-Query Engine - Entity query and filter composition
//!
//! This crate selects entities from any store implementing
//! [`bim_query_model::EntityStore`]. A query is executed in a single pass:
//!
//! 1. **Category scan** - every entity of the category and role, in store order
//! 2. **Variant resolution** - instance queries only; `ActiveOnly` resolves to
//!    the store's active design variant or fails
//! 3. **Attribute filters** - variant, grouping name, discriminator name and
//!    level, each skipped when its predicate is absent
//!
//! # Example
//!
//! ```ignore
//! use bim_query_engine::{instances, MemoryStore};
//! use bim_query_model::{Category, InstanceQuery};
//!
//! let store = MemoryStore::from_json(snapshot_json)?;
//! let doors = instances(
//!     &store,
//!     &InstanceQuery::new(Category::Doors).grouping_name("M_Single-Flush"),
//! )?;
//! println!("Found {} doors", doors.len());
//! ```

mod executor;
mod filter;
mod memory;
mod scanner;
mod variant;

pub use executor::QueryExecutor;
pub use filter::{FilterChain, FilterStage};
pub use memory::{MemoryStore, MemoryStoreBuilder, StoreSnapshot};
pub use scanner::CategoryScanner;
pub use variant::VariantResolver;

use bim_query_model::{Entity, EntityStore, InstanceQuery, Query, Result, TypeQuery};
use std::sync::Arc;

/// Execute a query with default settings
pub fn execute(store: &dyn EntityStore, query: &Query) -> Result<Vec<Arc<Entity>>> {
    QueryExecutor::new().execute(store, query)
}

/// Collect instances of a category
pub fn instances(store: &dyn EntityStore, query: &InstanceQuery) -> Result<Vec<Arc<Entity>>> {
    QueryExecutor::new().execute_instances(store, query)
}

/// Collect type definitions of a category
pub fn types(store: &dyn EntityStore, query: &TypeQuery) -> Vec<Arc<Entity>> {
    QueryExecutor::new().execute_types(store, query)
}
