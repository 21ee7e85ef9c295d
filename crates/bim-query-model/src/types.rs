// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for model entities
//!
//! This module defines the entity record and the identifiers used to refer to
//! entities, levels and design variants.

use crate::{QueryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Reference to a level entity
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct LevelRef(pub EntityId);

impl fmt::Display for LevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.0)
    }
}

impl From<u32> for LevelRef {
    fn from(id: u32) -> Self {
        LevelRef(EntityId(id))
    }
}

/// Reference to a design variant group
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct VariantRef(pub EntityId);

impl fmt::Display for VariantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "variant {}", self.0)
    }
}

impl From<u32> for VariantRef {
    fn from(id: u32) -> Self {
        VariantRef(EntityId(id))
    }
}

/// Model category enumeration
///
/// Covers the common built-in categories. Anything else is captured with its
/// raw name. Serialized as its display name; deserialization goes through
/// [`Category::parse`], so every spelling of a built-in category loads as the
/// same variant.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "CategoryRepr", into = "String")]
pub enum Category {
    // Datums and organisation
    Levels,
    Grids,
    DesignOptions,

    // Building elements
    Walls,
    Doors,
    Windows,
    Floors,
    Roofs,
    Ceilings,
    Columns,
    StructuralColumns,
    StructuralFraming,
    Stairs,
    Railings,
    CurtainPanels,

    // Components
    Furniture,
    GenericModels,
    MechanicalEquipment,
    PlumbingFixtures,
    LightingFixtures,

    // Spaces
    Rooms,

    /// Unknown category - stores the raw name
    Other(String),
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Accepted serialized forms: a plain name, or `{ "other": name }`
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Name(String),
    Other { other: String },
}

impl From<CategoryRepr> for Category {
    fn from(repr: CategoryRepr) -> Self {
        match repr {
            CategoryRepr::Name(name) | CategoryRepr::Other { other: name } => {
                Category::parse(&name)
            }
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name().to_string()
    }
}

impl Category {
    /// Parse a category name
    ///
    /// Case-insensitive, ignores spaces and underscores and an optional `OST_`
    /// prefix, so `"OST_DesignOptions"`, `"design_options"` and
    /// `"Design Options"` are the same category.
    pub fn parse(s: &str) -> Self {
        let upper = s.trim().to_uppercase();
        let name: String = upper
            .strip_prefix("OST_")
            .unwrap_or(&upper)
            .chars()
            .filter(|c| *c != '_' && *c != ' ')
            .collect();
        match name.as_str() {
            "LEVELS" => Category::Levels,
            "GRIDS" => Category::Grids,
            "DESIGNOPTIONS" => Category::DesignOptions,
            "WALLS" => Category::Walls,
            "DOORS" => Category::Doors,
            "WINDOWS" => Category::Windows,
            "FLOORS" => Category::Floors,
            "ROOFS" => Category::Roofs,
            "CEILINGS" => Category::Ceilings,
            "COLUMNS" => Category::Columns,
            "STRUCTURALCOLUMNS" => Category::StructuralColumns,
            "STRUCTURALFRAMING" => Category::StructuralFraming,
            "STAIRS" => Category::Stairs,
            "RAILINGS" | "STAIRSRAILING" => Category::Railings,
            "CURTAINWALLPANELS" | "CURTAINPANELS" => Category::CurtainPanels,
            "FURNITURE" => Category::Furniture,
            "GENERICMODEL" | "GENERICMODELS" => Category::GenericModels,
            "MECHANICALEQUIPMENT" => Category::MechanicalEquipment,
            "PLUMBINGFIXTURES" => Category::PlumbingFixtures,
            "LIGHTINGFIXTURES" => Category::LightingFixtures,
            "ROOMS" => Category::Rooms,
            _ => Category::Other(s.trim().to_string()),
        }
    }

    /// Resolve an `Other` that spells a built-in category to that category
    ///
    /// ```ignore
    /// assert_eq!(Category::Other("Walls".into()).canonical(), Category::Walls);
    /// ```
    pub fn canonical(&self) -> Category {
        match self {
            Category::Other(name) => Category::parse(name),
            known => known.clone(),
        }
    }

    /// Get the display name of the category
    pub fn name(&self) -> &str {
        match self {
            Category::Levels => "Levels",
            Category::Grids => "Grids",
            Category::DesignOptions => "Design Options",
            Category::Walls => "Walls",
            Category::Doors => "Doors",
            Category::Windows => "Windows",
            Category::Floors => "Floors",
            Category::Roofs => "Roofs",
            Category::Ceilings => "Ceilings",
            Category::Columns => "Columns",
            Category::StructuralColumns => "Structural Columns",
            Category::StructuralFraming => "Structural Framing",
            Category::Stairs => "Stairs",
            Category::Railings => "Railings",
            Category::CurtainPanels => "Curtain Panels",
            Category::Furniture => "Furniture",
            Category::GenericModels => "Generic Models",
            Category::MechanicalEquipment => "Mechanical Equipment",
            Category::PlumbingFixtures => "Plumbing Fixtures",
            Category::LightingFixtures => "Lighting Fixtures",
            Category::Rooms => "Rooms",
            Category::Other(s) => s,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether an entity is placed in the model or describes a type
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A placed object
    Instance,
    /// A template/type record that instances refer to
    TypeDefinition,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Instance => write!(f, "instance"),
            Role::TypeDefinition => write!(f, "type definition"),
        }
    }
}

/// A single entity in the model
///
/// `level` and `variant` only apply to instances. A `variant` of `None` means
/// the instance is not assigned to any design variant, which never matches a
/// variant filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity ID
    pub id: EntityId,
    /// Category tag
    pub category: Category,
    /// Instance or type definition
    pub role: Role,
    /// Family/template name, only present for family-based categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping_name: Option<String>,
    /// Type label of the entity
    pub discriminator_name: String,
    /// Level the instance is placed on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LevelRef>,
    /// Design variant the instance belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantRef>,
}

impl Entity {
    /// Create a new instance entity
    pub fn instance(
        id: impl Into<EntityId>,
        category: Category,
        discriminator_name: impl Into<String>,
    ) -> Self {
        Self::new(id.into(), category, Role::Instance, discriminator_name.into())
    }

    /// Create a new type definition entity
    pub fn type_definition(
        id: impl Into<EntityId>,
        category: Category,
        discriminator_name: impl Into<String>,
    ) -> Self {
        Self::new(
            id.into(),
            category,
            Role::TypeDefinition,
            discriminator_name.into(),
        )
    }

    fn new(id: EntityId, category: Category, role: Role, discriminator_name: String) -> Self {
        Self {
            id,
            category,
            role,
            grouping_name: None,
            discriminator_name,
            level: None,
            variant: None,
        }
    }

    /// Set the family/template name
    pub fn with_grouping_name(mut self, name: impl Into<String>) -> Self {
        self.grouping_name = Some(name.into());
        self
    }

    /// Place the entity on a level
    pub fn on_level(mut self, level: impl Into<LevelRef>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Assign the entity to a design variant
    pub fn in_variant(mut self, variant: impl Into<VariantRef>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Check if this entity is a placed instance
    pub fn is_instance(&self) -> bool {
        self.role == Role::Instance
    }

    /// Check the role invariants
    ///
    /// Type definitions never carry a level or a variant.
    pub fn validate(&self) -> Result<()> {
        if self.role == Role::TypeDefinition {
            if self.level.is_some() {
                return Err(QueryError::invalid_entity(
                    self.id,
                    "type definitions cannot be placed on a level",
                ));
            }
            if self.variant.is_some() {
                return Err(QueryError::invalid_entity(
                    self.id,
                    "type definitions cannot belong to a design variant",
                ));
            }
        }
        Ok(())
    }
}

/// A level (storey) in the model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level reference
    pub id: LevelRef,
    /// Level name
    pub name: String,
    /// Elevation in meters
    #[serde(default)]
    pub elevation: f64,
}

impl Level {
    /// Create a new level
    pub fn new(id: impl Into<LevelRef>, name: impl Into<String>, elevation: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            elevation,
        }
    }
}

impl From<&Level> for LevelRef {
    fn from(level: &Level) -> Self {
        level.id
    }
}

/// A named design variant group
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroup {
    /// Variant reference
    pub id: VariantRef,
    /// Variant name (e.g. "Option 1")
    pub name: String,
}

impl VariantGroup {
    /// Create a new variant group
    pub fn new(id: impl Into<VariantRef>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&VariantGroup> for VariantRef {
    fn from(variant: &VariantGroup) -> Self {
        variant.id
    }
}
