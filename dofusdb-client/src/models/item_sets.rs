use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{MultiLangString, MultiLangStringFields};
use super::items::{Item, ItemEffect};
use super::Resource;
use crate::expr::{Expr, Field, Fields};

/// A set of items granting bonuses when worn together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemSet {
    pub id: Option<i32>,
    pub name: Option<MultiLangString>,
    pub slug: Option<MultiLangString>,
    pub level: Option<i32>,
    pub items: Option<Vec<Item>>,
    pub type_ids: Option<Vec<i32>>,
    pub bonus_is_secret: Option<bool>,
    /// Bonus effects, indexed by the number of items worn
    pub effects: Option<Vec<Vec<ItemEffect>>>,
    pub is_cosmetic: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for ItemSet {
    type Fields = ItemSetFields;
    const PATH: &'static str = "item-sets/";
    const NAME: &'static str = "item sets";

    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct ItemSetFields {
    expr: Expr,
}

impl Fields for ItemSetFields {
    fn from_expr(expr: Expr) -> Self {
        Self { expr }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl ItemSetFields {
    pub fn id(&self) -> Field<i32> {
        self.field("id")
    }

    pub fn name(&self) -> MultiLangStringFields {
        self.field("name")
    }

    pub fn slug(&self) -> MultiLangStringFields {
        self.field("slug")
    }

    pub fn level(&self) -> Field<i32> {
        self.field("level")
    }

    pub fn bonus_is_secret(&self) -> Field<bool> {
        self.field("bonusIsSecret")
    }

    pub fn is_cosmetic(&self) -> Field<bool> {
        self.field("isCosmetic")
    }
}
