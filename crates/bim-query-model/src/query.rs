// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable query values
//!
//! Instance and type-definition queries are separate types, so level and
//! variant predicates cannot be attached to a type-definition query at all.
//! [`QueryBuilder`] covers callers that only know the role at runtime and
//! rejects those predicates with [`QueryError::InapplicablePredicate`].

use crate::{Category, LevelRef, QueryError, Result, Role, VariantRef};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// How instances are filtered by design variant membership
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantMode {
    /// No variant filtering
    Unfiltered,
    /// Keep instances of the model's active variant
    #[default]
    ActiveOnly,
    /// Keep instances of this variant
    Specific(VariantRef),
}

/// Exact-match name predicates shared by both query roles
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameFilters {
    /// Family/template name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping_name: Option<String>,
    /// Type label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_name: Option<String>,
}

impl NameFilters {
    /// Check if no name predicate is set
    pub fn is_empty(&self) -> bool {
        self.grouping_name.is_none() && self.discriminator_name.is_none()
    }
}

/// Query over placed instances of a category
///
/// Defaults to [`VariantMode::ActiveOnly`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceQuery {
    /// Category to scan
    pub category: Category,
    /// Name predicates
    #[serde(flatten)]
    pub names: NameFilters,
    /// Accepted levels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<FxHashSet<LevelRef>>,
    /// Variant membership mode
    #[serde(default)]
    pub variant_mode: VariantMode,
}

impl InstanceQuery {
    /// Create a query for all instances of a category in the active variant
    pub fn new(category: Category) -> Self {
        Self {
            category,
            names: NameFilters::default(),
            levels: None,
            variant_mode: VariantMode::default(),
        }
    }

    /// Keep instances of this family/template
    pub fn grouping_name(mut self, name: impl Into<String>) -> Self {
        self.names.grouping_name = Some(name.into());
        self
    }

    /// Keep instances with this type label
    pub fn discriminator_name(mut self, name: impl Into<String>) -> Self {
        self.names.discriminator_name = Some(name.into());
        self
    }

    /// Keep instances placed on any of these levels
    pub fn levels<I, L>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LevelRef>,
    {
        self.levels = Some(levels.into_iter().map(Into::into).collect());
        self
    }

    /// Set the variant mode
    pub fn variant_mode(mut self, mode: VariantMode) -> Self {
        self.variant_mode = mode;
        self
    }

    /// Keep instances of a specific variant
    pub fn variant(self, variant: impl Into<VariantRef>) -> Self {
        self.variant_mode(VariantMode::Specific(variant.into()))
    }

    /// Disable variant filtering
    pub fn any_variant(self) -> Self {
        self.variant_mode(VariantMode::Unfiltered)
    }
}

/// Query over type definitions of a category
///
/// Deserializing rejects level and variant predicates instead of dropping them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QueryFields")]
pub struct TypeQuery {
    /// Category to scan
    pub category: Category,
    /// Name predicates
    #[serde(flatten)]
    pub names: NameFilters,
}

impl TypeQuery {
    /// Create a query for all type definitions of a category
    pub fn new(category: Category) -> Self {
        Self {
            category,
            names: NameFilters::default(),
        }
    }

    /// Keep types of this family/template
    pub fn grouping_name(mut self, name: impl Into<String>) -> Self {
        self.names.grouping_name = Some(name.into());
        self
    }

    /// Keep types with this label
    pub fn discriminator_name(mut self, name: impl Into<String>) -> Self {
        self.names.discriminator_name = Some(name.into());
        self
    }
}

/// A query of either role
///
/// Deserialization goes through [`QueryBuilder::build`], so a type-definition
/// query carrying level or variant predicates fails to load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Query {
    /// Select placed instances
    Instance(InstanceQuery),
    /// Select type definitions
    TypeDefinition(TypeQuery),
}

impl Query {
    /// Start a query whose role is only known at runtime
    pub fn builder(category: Category, role: Role) -> QueryBuilder {
        QueryBuilder::new(category, role)
    }

    /// Role selected by this query
    pub fn role(&self) -> Role {
        match self {
            Query::Instance(_) => Role::Instance,
            Query::TypeDefinition(_) => Role::TypeDefinition,
        }
    }

    /// Category scanned by this query
    pub fn category(&self) -> &Category {
        match self {
            Query::Instance(q) => &q.category,
            Query::TypeDefinition(q) => &q.category,
        }
    }

    /// Name predicates of this query
    pub fn names(&self) -> &NameFilters {
        match self {
            Query::Instance(q) => &q.names,
            Query::TypeDefinition(q) => &q.names,
        }
    }
}

impl From<InstanceQuery> for Query {
    fn from(query: InstanceQuery) -> Self {
        Query::Instance(query)
    }
}

impl From<TypeQuery> for Query {
    fn from(query: TypeQuery) -> Self {
        Query::TypeDefinition(query)
    }
}

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawQuery::deserialize(deserializer)?;
        raw.fields
            .into_builder(raw.role)
            .build()
            .map_err(serde::de::Error::custom)
    }
}

/// Every predicate either role could carry, as read from serialized input
#[derive(Deserialize)]
struct QueryFields {
    category: Category,
    #[serde(flatten)]
    names: NameFilters,
    #[serde(default)]
    levels: Option<FxHashSet<LevelRef>>,
    #[serde(default)]
    variant_mode: Option<VariantMode>,
}

impl QueryFields {
    fn into_builder(self, role: Role) -> QueryBuilder {
        QueryBuilder {
            category: self.category,
            role,
            names: self.names,
            levels: self.levels,
            variant_mode: self.variant_mode,
        }
    }
}

impl TryFrom<QueryFields> for TypeQuery {
    type Error = QueryError;

    fn try_from(fields: QueryFields) -> Result<Self> {
        fields.into_builder(Role::TypeDefinition).build_types()
    }
}

#[derive(Deserialize)]
struct RawQuery {
    role: Role,
    #[serde(flatten)]
    fields: QueryFields,
}

/// Builder for queries whose role is chosen at runtime
///
/// Level and variant predicates are accepted here but [`QueryBuilder::build`]
/// fails if they are combined with [`Role::TypeDefinition`].
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    category: Category,
    role: Role,
    names: NameFilters,
    levels: Option<FxHashSet<LevelRef>>,
    variant_mode: Option<VariantMode>,
}

impl QueryBuilder {
    /// Create a new builder
    pub fn new(category: Category, role: Role) -> Self {
        Self {
            category,
            role,
            names: NameFilters::default(),
            levels: None,
            variant_mode: None,
        }
    }

    /// Set the family/template name predicate
    pub fn grouping_name(mut self, name: impl Into<String>) -> Self {
        self.names.grouping_name = Some(name.into());
        self
    }

    /// Set the type label predicate
    pub fn discriminator_name(mut self, name: impl Into<String>) -> Self {
        self.names.discriminator_name = Some(name.into());
        self
    }

    /// Set the level predicate
    pub fn levels<I, L>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LevelRef>,
    {
        self.levels = Some(levels.into_iter().map(Into::into).collect());
        self
    }

    /// Set the variant mode
    pub fn variant_mode(mut self, mode: VariantMode) -> Self {
        self.variant_mode = Some(mode);
        self
    }

    /// Build the query
    pub fn build(self) -> Result<Query> {
        match self.role {
            Role::Instance => Ok(Query::Instance(InstanceQuery {
                category: self.category,
                names: self.names,
                levels: self.levels,
                variant_mode: self.variant_mode.unwrap_or_default(),
            })),
            Role::TypeDefinition => self.build_types().map(Query::TypeDefinition),
        }
    }

    fn build_types(self) -> Result<TypeQuery> {
        if self.levels.is_some() {
            return Err(QueryError::InapplicablePredicate {
                role: Role::TypeDefinition,
                predicate: "level",
            });
        }
        if self.variant_mode.is_some() {
            return Err(QueryError::InapplicablePredicate {
                role: Role::TypeDefinition,
                predicate: "design variant",
            });
        }
        Ok(TypeQuery {
            category: self.category,
            names: self.names,
        })
    }
}
