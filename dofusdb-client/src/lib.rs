//! # dofusdb-client
//!
//! Typed, paginated query client for the DofusDB REST API.
//!
//! ## Features
//!
//! - **Typed filters**: write conditions against resource field views; they compile to the API's filter grammar
//! - **Query encoding**: `$limit`, `$skip`, `$sort`, `$select` and nested `$and`/`$or` predicates
//! - **Pagination**: one logical query becomes as many page requests as needed, streamed lazily
//! - **Cancellation**: a `CancellationToken` aborts pagination and the request in flight
//! - **Configuration**: defaults, `dofusdb.toml` and `DOFUSDB_` environment variables via Figment
//!
//! ## Example
//!
//! ```rust,no_run
//! use dofusdb_client::prelude::*;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::load()?;
//!     init_tracing(&config);
//!
//!     let provider = DofusDbQueryProvider::from_config(&config)?;
//!     let query = provider
//!         .items()
//!         .filter(|i| i.name().fr().eq("Coiffe du Bouftou") | i.level().ge(190))?
//!         .take(10);
//!
//!     println!("{} matching items", query.count().await?);
//!
//!     let mut items = std::pin::pin!(query.execute());
//!     while let Some(item) = items.next().await {
//!         let item = item?;
//!         println!("{:?} {:?}", item.id, item.name.and_then(|n| n.fr));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod expr;
pub mod models;
pub mod observability;
pub mod paginate;
pub mod query;
pub mod search;

pub mod prelude {
    pub use crate::client::{ApiClient, DofusDbClient, DofusDbClientsFactory};
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::error::{Error, Result};
    pub use crate::expr::{Expr, Field, Fields, Lambda, Value};
    pub use crate::models::{
        Item, ItemSet, ItemSuperType, ItemType, MultiLangString, Resource, ValueOrFalse,
    };
    pub use crate::observability::init_tracing;
    pub use crate::paginate::multi_query_search;
    pub use crate::query::{DofusDbQuery, DofusDbQueryProvider};
    pub use crate::search::{SearchPredicate, SearchQuery, SearchResult, SortOrder};

    pub use tokio_util::sync::CancellationToken;
}
