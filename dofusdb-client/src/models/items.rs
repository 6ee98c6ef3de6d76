//! Items and the shapes embedded in them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{MultiLangString, MultiLangStringFields, ValueOrFalse};
use super::item_types::{ItemType, ItemTypeFields};
use super::Resource;
use crate::expr::{Expr, Field, Fields};

/// An effect of an item, applied when the item is used or equipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemEffect {
    /// Minimum value of the characteristic
    pub from: Option<i32>,
    /// Maximum value of the characteristic
    pub to: Option<i32>,
    pub element_id: Option<i32>,
    pub effect_id: Option<i32>,
    /// Characteristic the effect applies to, `-1` when there is none
    pub characteristic: Option<i32>,
    pub category: Option<i32>,
}

/// The short form of an item set embedded in an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemSetMinimal {
    pub id: Option<i32>,
    pub name: Option<MultiLangString>,
    pub level: Option<i32>,
    pub bonus_is_secret: Option<bool>,
    pub is_cosmetic: Option<bool>,
}

/// An item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
    pub id: Option<i32>,
    pub type_id: Option<i32>,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub name: Option<MultiLangString>,
    pub slug: Option<MultiLangString>,
    pub description: Option<MultiLangString>,
    pub important_notice: Option<MultiLangString>,
    pub level: Option<i32>,
    pub real_weight: Option<i32>,
    pub price: Option<i32>,
    pub criteria: Option<String>,
    pub img: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    pub item_set_id: Option<i32>,
    /// The set the item belongs to; the server sends `false` for none
    pub item_set: Option<ValueOrFalse<ItemSetMinimal>>,

    pub hide_effects: Option<bool>,
    pub effects: Option<Vec<ItemEffect>>,
    pub evolutive_effect_ids: Option<Vec<i32>>,
    pub favorite_sub_areas: Option<Vec<i32>>,
    pub favorite_sub_areas_bonus: Option<i32>,

    pub icon_id: Option<i32>,
    pub appearance_id: Option<i32>,
    pub is_colorable: Option<bool>,
    pub has_living_object_skin_jnt_mood: Option<bool>,

    pub has_recipe: Option<bool>,
    pub recipe_slots: Option<i32>,
    pub recipe_ids: Option<Vec<i32>>,
    pub recipes_that_use: Option<Vec<i32>>,
    pub craft_xp_ratio: Option<f64>,
    pub craft_visible: Option<String>,
    pub craft_conditional: Option<String>,
    pub craft_feasible: Option<String>,
    pub secret_recipe: Option<bool>,
    pub bonus_is_secret: Option<bool>,

    pub usable: Option<bool>,
    pub targetable: Option<bool>,
    pub criteria_target: Option<String>,
    pub non_usable_on_another: Option<bool>,
    pub need_use_confirm: Option<bool>,
    pub use_animation_id: Option<i32>,

    /// `(sub area, resource count)` pairs
    pub resources_by_subarea: Option<Vec<(i32, i32)>>,

    pub drop_monster_ids: Option<Vec<i32>>,
    pub drop_temporis_monster_ids: Option<Vec<i32>>,
    pub drop_sub_area_ids: Option<Vec<i32>>,

    pub recycling_nuggets: Option<f64>,
    pub favorite_recycling_subareas: Option<Vec<i32>>,

    pub quests_that_use: Option<Vec<i32>>,
    pub quests_that_reward: Option<Vec<i32>>,

    pub start_legendary_treasure_hunt: Option<i32>,
    pub legendary_treasure_hunt_that_reward: Option<i32>,

    #[serde(rename = "m_flags")]
    pub flags: Option<i64>,
    pub cursed: Option<bool>,
    pub exchangeable: Option<bool>,
    pub etheral: Option<bool>,
    pub enhanceable: Option<bool>,
    pub object_is_display_on_web: Option<bool>,
    pub is_destructible: Option<bool>,
    pub is_saleable: Option<bool>,
    pub is_legendary: Option<bool>,

    pub visibility: Option<String>,
    pub change_version: Option<String>,
    pub tooltip_expiration_date: Option<i64>,
}

impl Resource for Item {
    type Fields = ItemFields;
    const PATH: &'static str = "items/";
    const NAME: &'static str = "items";

    fn id(&self) -> Option<i32> {
        self.id
    }
}

/// Field view over an [`Item`]
#[derive(Debug, Clone)]
pub struct ItemFields {
    expr: Expr,
}

impl Fields for ItemFields {
    fn from_expr(expr: Expr) -> Self {
        Self { expr }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl ItemFields {
    pub fn id(&self) -> Field<i32> {
        self.field("id")
    }

    pub fn type_id(&self) -> Field<i32> {
        self.field("typeId")
    }

    pub fn item_type(&self) -> ItemTypeFields {
        self.field("type")
    }

    pub fn name(&self) -> MultiLangStringFields {
        self.field("name")
    }

    pub fn slug(&self) -> MultiLangStringFields {
        self.field("slug")
    }

    pub fn description(&self) -> MultiLangStringFields {
        self.field("description")
    }

    pub fn level(&self) -> Field<i32> {
        self.field("level")
    }

    pub fn real_weight(&self) -> Field<i32> {
        self.field("realWeight")
    }

    pub fn price(&self) -> Field<i32> {
        self.field("price")
    }

    pub fn criteria(&self) -> Field<String> {
        self.field("criteria")
    }

    pub fn img(&self) -> Field<String> {
        self.field("img")
    }

    pub fn created_at(&self) -> Field<DateTime<Utc>> {
        self.field("createdAt")
    }

    pub fn updated_at(&self) -> Field<DateTime<Utc>> {
        self.field("updatedAt")
    }

    pub fn item_set_id(&self) -> Field<i32> {
        self.field("itemSetId")
    }

    pub fn icon_id(&self) -> Field<i32> {
        self.field("iconId")
    }

    pub fn appearance_id(&self) -> Field<i32> {
        self.field("appearanceId")
    }

    pub fn has_recipe(&self) -> Field<bool> {
        self.field("hasRecipe")
    }

    pub fn craft_xp_ratio(&self) -> Field<f64> {
        self.field("craftXpRatio")
    }

    pub fn usable(&self) -> Field<bool> {
        self.field("usable")
    }

    pub fn recycling_nuggets(&self) -> Field<f64> {
        self.field("recyclingNuggets")
    }

    pub fn cursed(&self) -> Field<bool> {
        self.field("cursed")
    }

    pub fn exchangeable(&self) -> Field<bool> {
        self.field("exchangeable")
    }

    pub fn is_saleable(&self) -> Field<bool> {
        self.field("isSaleable")
    }

    pub fn is_legendary(&self) -> Field<bool> {
        self.field("isLegendary")
    }
}
