//! Search model: predicates, queries, result envelopes and the wire encoding
//!
//! - [`SearchPredicate`]: filter tree with exhaustive negation
//! - [`SearchQuery`]: limit, skip, sort, select and predicates of one search
//! - [`SearchResult`]: one page returned by the server
//! - [`to_query_string`]: the nested-bracket query string the server expects

mod params;
mod predicate;
mod query;
mod result;

pub use params::{camel_case, camel_case_path, to_query_string};
pub use predicate::{PredicateKind, SearchPredicate};
pub use query::{SearchQuery, SortOrder};
pub use result::SearchResult;
