//! Item categorization: types and super types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{MultiLangString, MultiLangStringFields};
use super::Resource;
use crate::expr::{Expr, Field, Fields};

/// A type of item, used for categorization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemType {
    pub id: Option<i32>,
    pub name: Option<MultiLangString>,
    pub super_type_id: Option<i32>,
    pub super_type: Option<ItemSuperType>,
    pub category_id: Option<i32>,
    /// Whether the type appears in the website's encyclopedia
    pub is_in_encyclopedia: Option<bool>,
    pub plural: Option<bool>,
    pub gender: Option<i32>,
    /// Zone of effect shared by items of this type, in the game's compact notation
    pub raw_zone: Option<String>,
    pub mimickable: Option<bool>,
    /// `-1` when the default ratio applies
    pub craft_xp_ratio: Option<i32>,
    pub possible_positions: Option<Vec<i32>>,
    pub evolutive_type_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for ItemType {
    type Fields = ItemTypeFields;
    const PATH: &'static str = "item-types/";
    const NAME: &'static str = "item types";

    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct ItemTypeFields {
    expr: Expr,
}

impl Fields for ItemTypeFields {
    fn from_expr(expr: Expr) -> Self {
        Self { expr }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl ItemTypeFields {
    pub fn id(&self) -> Field<i32> {
        self.field("id")
    }

    pub fn name(&self) -> MultiLangStringFields {
        self.field("name")
    }

    pub fn super_type_id(&self) -> Field<i32> {
        self.field("superTypeId")
    }

    pub fn category_id(&self) -> Field<i32> {
        self.field("categoryId")
    }

    pub fn is_in_encyclopedia(&self) -> Field<bool> {
        self.field("isInEncyclopedia")
    }

    pub fn mimickable(&self) -> Field<bool> {
        self.field("mimickable")
    }
}

/// A super type of item, grouping several types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemSuperType {
    pub id: Option<i32>,
    pub name: Option<MultiLangString>,
    /// Slots where items of this super type can be equipped
    pub positions: Option<Vec<i32>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for ItemSuperType {
    type Fields = ItemSuperTypeFields;
    const PATH: &'static str = "item-super-types/";
    const NAME: &'static str = "item super types";

    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct ItemSuperTypeFields {
    expr: Expr,
}

impl Fields for ItemSuperTypeFields {
    fn from_expr(expr: Expr) -> Self {
        Self { expr }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl ItemSuperTypeFields {
    pub fn id(&self) -> Field<i32> {
        self.field("id")
    }

    pub fn name(&self) -> MultiLangStringFields {
        self.field("name")
    }
}
