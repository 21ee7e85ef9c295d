// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for query operations

use crate::{EntityId, LevelRef, Role, VariantRef};
use thiserror::Error;

/// Result type alias for query operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while building stores or executing queries
///
/// An empty result set is never an error. Unknown categories and attribute
/// filters that a category can never satisfy also yield empty results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Active-variant filtering was requested but the model has no active variant
    #[error("Cannot filter by active design variant: no variant is active in the model")]
    UnresolvedVariant,

    /// A predicate was supplied that the query role cannot carry
    #[error("The {predicate} filter is not applicable to {role} queries")]
    InapplicablePredicate { role: Role, predicate: &'static str },

    /// Entity violates the role invariants
    #[error("Invalid entity {id}: {reason}")]
    InvalidEntity { id: EntityId, reason: String },

    /// Two entities were registered with the same id
    #[error("Duplicate entity {0}")]
    DuplicateEntity(EntityId),

    /// Two levels were registered with the same id
    #[error("Duplicate {0}")]
    DuplicateLevel(LevelRef),

    /// Two design variant groups were registered with the same id
    #[error("Duplicate design {0}")]
    DuplicateVariant(VariantRef),

    /// Store snapshot could not be loaded
    #[error("Invalid store snapshot: {0}")]
    Snapshot(String),
}

impl QueryError {
    /// Create an invalid entity error
    pub fn invalid_entity(id: EntityId, reason: impl Into<String>) -> Self {
        QueryError::InvalidEntity {
            id,
            reason: reason.into(),
        }
    }

    /// Create a snapshot error
    pub fn snapshot(msg: impl Into<String>) -> Self {
        QueryError::Snapshot(msg.into())
    }
}
