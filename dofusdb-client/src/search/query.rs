//! Pagination, ordering, projection and filtering of one logical search
//!
//! # Example
//!
//! ```rust
//! use dofusdb_client::search::{SearchPredicate, SearchQuery, SortOrder};
//!
//! let query = SearchQuery::new()
//!     .with_limit(20)
//!     .with_skip(40)
//!     .with_sort("level", SortOrder::Descending)
//!     .with_select("name.fr")
//!     .with_predicate(SearchPredicate::gte("level", "100"));
//!
//! assert_eq!(query.limit, Some(20));
//! assert_eq!(query.sort, vec![("level".to_string(), SortOrder::Descending)]);
//! ```

use super::predicate::SearchPredicate;

/// Direction for ordering results
///
/// `None` entries are kept in the query but never sent to the server.
///
/// ```rust
/// use dofusdb_client::search::SortOrder;
///
/// assert_eq!(SortOrder::Ascending.wire_value(), Some("1"));
/// assert_eq!(SortOrder::Descending.wire_value(), Some("-1"));
/// assert_eq!(SortOrder::None.wire_value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Sort in descending order (Z-A, 9-0)
    Descending,
    /// No ordering
    #[default]
    None,
    /// Sort in ascending order (A-Z, 0-9)
    Ascending,
}

impl SortOrder {
    /// The value sent as `$sort[<path>]=<value>`, if any
    pub const fn wire_value(self) -> Option<&'static str> {
        match self {
            Self::Ascending => Some("1"),
            Self::Descending => Some("-1"),
            Self::None => None,
        }
    }
}

/// A search query: limit, skip, sort, select and predicates
///
/// `limit` is the total number of results the caller wants; the pagination
/// accumulator may split it over several page requests. Sort entries keep
/// their insertion order, and setting a path twice overwrites its direction
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Maximum number of results to return
    pub limit: Option<u64>,
    /// Number of results to skip
    pub skip: Option<u64>,
    /// Ordered mapping from dotted field path to direction
    pub sort: Vec<(String, SortOrder)>,
    /// Dotted field paths to project
    pub select: Vec<String>,
    /// Filters, all of which must hold
    pub predicates: Vec<SearchPredicate>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Set the direction for a field path, keeping its original position if already present
    #[must_use]
    pub fn with_sort(mut self, path: impl Into<String>, order: SortOrder) -> Self {
        let path = path.into();
        match self.sort.iter_mut().find(|(existing, _)| *existing == path) {
            Some(entry) => entry.1 = order,
            None => self.sort.push((path, order)),
        }
        self
    }

    #[must_use]
    pub fn with_select(mut self, path: impl Into<String>) -> Self {
        self.select.push(path.into());
        self
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: SearchPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// The same sort, select and predicates with a different window
    pub fn page(&self, limit: Option<u64>, skip: Option<u64>) -> Self {
        Self {
            limit,
            skip,
            sort: self.sort.clone(),
            select: self.select.clone(),
            predicates: self.predicates.clone(),
        }
    }

    /// Check if the query sets nothing at all
    pub fn is_empty(&self) -> bool {
        self.limit.is_none()
            && self.skip.is_none()
            && self.sort.is_empty()
            && self.select.is_empty()
            && self.predicates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_is_empty() {
        assert!(SearchQuery::new().is_empty());
        assert!(!SearchQuery::new().with_limit(0).is_empty());
    }

    #[test]
    fn test_with_sort_overwrites_in_place() {
        let query = SearchQuery::new()
            .with_sort("name", SortOrder::Ascending)
            .with_sort("level", SortOrder::Ascending)
            .with_sort("name", SortOrder::Descending);

        assert_eq!(
            query.sort,
            vec![
                ("name".to_string(), SortOrder::Descending),
                ("level".to_string(), SortOrder::Ascending),
            ]
        );
    }

    #[test]
    fn test_page_keeps_everything_but_the_window() {
        let query = SearchQuery::new()
            .with_limit(50)
            .with_skip(3)
            .with_sort("level", SortOrder::Descending)
            .with_select("name")
            .with_predicate(SearchPredicate::eq("typeId", "1"));

        let page = query.page(Some(10), Some(43));
        assert_eq!(page.limit, Some(10));
        assert_eq!(page.skip, Some(43));
        assert_eq!(page.sort, query.sort);
        assert_eq!(page.select, query.select);
        assert_eq!(page.predicates, query.predicates);
    }

    #[test]
    fn test_sort_order_wire_values() {
        assert_eq!(SortOrder::Ascending.wire_value(), Some("1"));
        assert_eq!(SortOrder::Descending.wire_value(), Some("-1"));
        assert_eq!(SortOrder::None.wire_value(), None);
        assert_eq!(SortOrder::default(), SortOrder::None);
    }
}
