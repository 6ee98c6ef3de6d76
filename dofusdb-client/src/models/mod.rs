//! Resource shapes served by the DofusDB API
//!
//! Every field is optional: the server omits fields freely and `$select`
//! projections drop everything not asked for.

mod common;
mod item_sets;
mod item_types;
mod items;

use serde::de::DeserializeOwned;

use crate::expr::Fields;

pub use common::{MultiLangString, MultiLangStringFields, ValueOrFalse};
pub use item_sets::{ItemSet, ItemSetFields};
pub use item_types::{ItemSuperType, ItemSuperTypeFields, ItemType, ItemTypeFields};
pub use items::{Item, ItemEffect, ItemFields, ItemSetMinimal};

/// A resource collection exposed by the API
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Field view used to write filters, sorts and projections
    type Fields: Fields;

    /// Path segment of the collection, relative to the base URL
    const PATH: &'static str;

    /// Human readable collection name, used in logs
    const NAME: &'static str;

    fn id(&self) -> Option<i32>;
}
