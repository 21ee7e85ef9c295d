// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-Query Model - Entity, query and store definitions
//!
//! This crate provides the shared vocabulary for querying entities held in an
//! in-memory BIM document. It defines the entity record, the immutable query
//! values and the read-only store interface that query engines consume.
//!
//! # Architecture
//!
//! - [`Entity`] - A single instance or type definition in the model
//! - [`Query`] - An immutable description of what to select
//! - [`EntityStore`] - Read access to a model snapshot
//! - [`EntityView`] - Category-specific narrowing of query results
//!
//! # Example
//!
//! ```ignore
//! use bim_query_model::{Category, InstanceQuery, Query};
//!
//! let query: Query = InstanceQuery::new(Category::Walls)
//!     .discriminator_name("Generic - 200mm")
//!     .into();
//! let walls = engine.execute(&store, &query)?;
//! ```

pub mod error;
pub mod query;
pub mod store;
pub mod types;
pub mod view;

// Re-export all public types
pub use error::*;
pub use query::*;
pub use store::*;
pub use types::*;
pub use view::*;
