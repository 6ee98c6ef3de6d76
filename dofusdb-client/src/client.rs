//! HTTP reader for DofusDB resource collections
//!
//! [`ApiClient`] is the seam the query builder and the pagination loop are
//! written against; [`DofusDbClient`] is the reqwest implementation and
//! [`DofusDbClientsFactory`] builds one per resource from a shared base URL.
//!
//! # Example
//!
//! ```rust,no_run
//! use dofusdb_client::client::{ApiClient, DofusDbClientsFactory};
//! use dofusdb_client::search::SearchQuery;
//!
//! # async fn example() -> dofusdb_client::error::Result<()> {
//! let items = DofusDbClientsFactory::production()?.items();
//! let page = items.search(&SearchQuery::new().with_limit(5)).await?;
//! println!("{} items in total", page.total);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{normalize_base_url, ClientConfig, BETA_URL, PRODUCTION_URL};
use crate::error::{Error, Result};
use crate::models::{Item, ItemSet, ItemSuperType, ItemType, Resource};
use crate::search::{SearchQuery, SearchResult};

/// Read access to one resource collection
#[async_trait]
pub trait ApiClient<R: Resource>: Send + Sync {
    /// Fetch a single resource by id
    async fn get(&self, id: i32) -> Result<R>;

    /// Total number of resources in the collection
    async fn count(&self) -> Result<u64>;

    /// Run one search request; the query is sent as-is, without pagination
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult<R>>;
}

/// reqwest-backed [`ApiClient`]
pub struct DofusDbClient<R> {
    http: reqwest::Client,
    resource_url: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for DofusDbClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            resource_url: self.resource_url.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for DofusDbClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DofusDbClient")
            .field("resource_url", &self.resource_url)
            .finish()
    }
}

impl<R: Resource> DofusDbClient<R> {
    /// Client for `R` under `base_url`, which must end with `/`
    pub fn new(http: reqwest::Client, base_url: &Url) -> Self {
        Self {
            http,
            resource_url: format!("{}{}", base_url, R::PATH),
            _resource: PhantomData,
        }
    }

    /// URL of the collection, ending with `/`
    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    /// URL for a search request; no `?` when the query string is empty
    pub fn search_url(&self, query: &SearchQuery) -> String {
        let params = query.to_query_string();
        if params.is_empty() {
            self.resource_url.clone()
        } else {
            format!("{}?{}", self.resource_url, params)
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(resource = R::NAME, url = %url, "Sending DofusDB request");

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "DofusDB request failed");
            Error::transport(url, e.status().map(|s| s.as_u16()), e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = failure_body(response.text().await);
            tracing::warn!(
                url = %url,
                status = %status,
                "DofusDB request returned non-success status"
            );
            return Err(Error::transport(
                url,
                Some(status.as_u16()),
                format!("{} - {}", status, body),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(url, Some(status.as_u16()), e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| Error::decode(url, e.to_string()))
    }
}

#[async_trait]
impl<R: Resource> ApiClient<R> for DofusDbClient<R> {
    async fn get(&self, id: i32) -> Result<R> {
        let url = format!("{}{}", self.resource_url, id);
        self.fetch(&url).await
    }

    async fn count(&self) -> Result<u64> {
        let url = self.search_url(&SearchQuery::new().with_limit(0));
        let result: SearchResult<R> = self.fetch(&url).await?;
        Ok(result.total)
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResult<R>> {
        let url = self.search_url(query);
        self.fetch(&url).await
    }
}

/// Builds [`DofusDbClient`]s that share one HTTP client and base URL
#[derive(Debug, Clone)]
pub struct DofusDbClientsFactory {
    base_url: Url,
    http: reqwest::Client,
}

impl DofusDbClientsFactory {
    /// Factory for an arbitrary base URL with default HTTP settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&ClientConfig {
            base_url: Some(base_url.to_string()),
            ..ClientConfig::default()
        })
    }

    pub fn production() -> Result<Self> {
        Self::new(PRODUCTION_URL)
    }

    pub fn beta() -> Result<Self> {
        Self::new(BETA_URL)
    }

    /// Factory using the base URL, user agent and timeout from `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                Error::transport(
                    base_url.as_str(),
                    None,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { base_url, http })
    }

    /// Factory reusing a caller-provided HTTP client
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client for any resource type
    pub fn client<R: Resource>(&self) -> DofusDbClient<R> {
        DofusDbClient::new(self.http.clone(), &self.base_url)
    }

    pub fn items(&self) -> DofusDbClient<Item> {
        self.client()
    }

    pub fn item_types(&self) -> DofusDbClient<ItemType> {
        self.client()
    }

    pub fn item_super_types(&self) -> DofusDbClient<ItemSuperType> {
        self.client()
    }

    pub fn item_sets(&self) -> DofusDbClient<ItemSet> {
        self.client()
    }
}

/// Response body for a failed request, or why it could not be read
fn failure_body<E: fmt::Display>(body: std::result::Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<body unavailable: {}>", e))
}
