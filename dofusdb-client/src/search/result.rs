//! Response envelope of a search request

use serde::{Deserialize, Serialize};

/// One page of search results
///
/// `total` is the number of resources matching the query on the server, not
/// the length of `data`.
///
/// ```rust
/// use dofusdb_client::search::SearchResult;
///
/// let page: SearchResult<serde_json::Value> =
///     serde_json::from_str(r#"{"total": 3, "limit": 1, "skip": 0, "data": [{"id": 1}]}"#).unwrap();
/// assert_eq!(page.total, 3);
/// assert_eq!(page.data.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Number of resources matching the query
    pub total: u64,
    /// Limit applied by the server
    pub limit: u64,
    /// Offset applied by the server
    pub skip: u64,
    /// The resources in this page
    pub data: Vec<T>,
}

impl<T> SearchResult<T> {
    /// An empty page reporting `total` matches
    pub fn empty(total: u64) -> Self {
        Self {
            total,
            limit: 0,
            skip: 0,
            data: Vec::new(),
        }
    }
}
