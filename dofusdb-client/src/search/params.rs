//! Query string encoding for the DofusDB filter grammar
//!
//! The remote service reads a nested-bracket convention rather than a generic
//! URL encoding, so the output is reproduced exactly:
//!
//! ```text
//! $limit=<int>
//! $skip=<int>
//! $sort[<path>]=1|-1
//! $select[]=<path>
//! <path>[$eq|$neq|$gt|$gte|$lt|$lte]=<value>
//! <path>[$in|$nin][]=<value>
//! $and[<idx>]...  $or[<idx>]...
//! ```
//!
//! Keys are emitted verbatim, values are form-urlencoded, entries are joined
//! with `&`. A top-level field keeps its dotted form (`name.fr[$eq]=...`);
//! under `$and`/`$or` every path segment gets its own bracket
//! (`$or[0][name][fr][$eq]=...`).
//!
//! # Example
//!
//! ```rust
//! use dofusdb_client::search::{SearchPredicate, SearchQuery, SortOrder};
//!
//! let query = SearchQuery::new()
//!     .with_limit(10)
//!     .with_sort("level", SortOrder::Descending)
//!     .with_predicate(SearchPredicate::eq("name.fr", "Gelano"));
//!
//! assert_eq!(
//!     query.to_query_string(),
//!     "$limit=10&$sort[level]=-1&name.fr[$eq]=Gelano"
//! );
//! ```

use url::form_urlencoded;

use super::predicate::SearchPredicate;
use super::query::SearchQuery;

/// Lower-case the first character of a single path segment
///
/// Blank input yields an empty string.
pub fn camel_case(segment: &str) -> String {
    if segment.trim().is_empty() {
        return String::new();
    }
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Camel-case every segment of a dotted path independently
pub fn camel_case_path(path: &str) -> String {
    path.split('.').map(camel_case).collect::<Vec<_>>().join(".")
}

/// Render a query into its wire query string
pub fn to_query_string(query: &SearchQuery) -> String {
    let mut params = QueryParams::default();

    if let Some(limit) = query.limit {
        params.push("$limit", &limit.to_string());
    }

    if let Some(skip) = query.skip {
        params.push("$skip", &skip.to_string());
    }

    for (path, order) in &query.sort {
        if let Some(value) = order.wire_value() {
            params.push(&format!("$sort[{}]", camel_case_path(path)), value);
        }
    }

    for path in &query.select {
        params.push("$select[]", &camel_case_path(path));
    }

    let mut prefix = Vec::new();
    for predicate in &query.predicates {
        push_predicate(&mut params, predicate, &mut prefix);
    }

    params.finish()
}

fn push_predicate(params: &mut QueryParams, predicate: &SearchPredicate, prefix: &mut Vec<String>) {
    let op = predicate.kind().operator();
    match predicate {
        SearchPredicate::Eq { field, value }
        | SearchPredicate::NotEq { field, value }
        | SearchPredicate::GreaterThan { field, value }
        | SearchPredicate::GreaterThanOrEqual { field, value }
        | SearchPredicate::LessThan { field, value }
        | SearchPredicate::LessThanOrEqual { field, value } => {
            params.push(&nested_key(prefix, field, &[op]), value);
        }
        SearchPredicate::In { field, values } | SearchPredicate::NotIn { field, values } => {
            let key = nested_key(prefix, field, &[op, ""]);
            for value in values {
                params.push(&key, value);
            }
        }
        SearchPredicate::And(children) | SearchPredicate::Or(children) => {
            for (index, child) in children.iter().enumerate() {
                prefix.push(op.to_string());
                prefix.push(index.to_string());
                push_predicate(params, child, prefix);
                prefix.truncate(prefix.len() - 2);
            }
        }
    }
}

/// Build `first[second][third]...` from the composite prefix, the field and the operator tokens
fn nested_key(prefix: &[String], field: &str, suffix: &[&str]) -> String {
    let mut tokens: Vec<String> = prefix.to_vec();
    if prefix.is_empty() {
        tokens.push(camel_case_path(field));
    } else {
        tokens.extend(field.split('.').map(camel_case));
    }
    tokens.extend(suffix.iter().map(|s| s.to_string()));

    let mut key = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i == 0 {
            key.push_str(token);
        } else {
            key.push('[');
            key.push_str(token);
            key.push(']');
        }
    }
    key
}

#[derive(Default)]
struct QueryParams {
    buf: String,
}

impl QueryParams {
    fn push(&mut self, key: &str, value: &str) {
        if !self.buf.is_empty() {
            self.buf.push('&');
        }
        self.buf.push_str(key);
        self.buf.push('=');
        self.buf
            .extend(form_urlencoded::byte_serialize(value.as_bytes()));
    }

    fn finish(self) -> String {
        self.buf
    }
}

impl SearchQuery {
    /// Render this query into its wire query string
    pub fn to_query_string(&self) -> String {
        to_query_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SortOrder;

    fn predicates(predicates: Vec<SearchPredicate>) -> SearchQuery {
        SearchQuery {
            predicates,
            ..SearchQuery::default()
        }
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(SearchQuery::new().to_query_string(), "");
    }

    #[test]
    fn test_limit() {
        assert_eq!(SearchQuery::new().with_limit(123).to_query_string(), "$limit=123");
    }

    #[test]
    fn test_skip() {
        assert_eq!(SearchQuery::new().with_skip(123).to_query_string(), "$skip=123");
    }

    #[test]
    fn test_sort() {
        let asc = SearchQuery::new().with_sort("parameter", SortOrder::Ascending);
        let desc = SearchQuery::new().with_sort("parameter", SortOrder::Descending);
        assert_eq!(asc.to_query_string(), "$sort[parameter]=1");
        assert_eq!(desc.to_query_string(), "$sort[parameter]=-1");
    }

    #[test]
    fn test_sort_none_is_omitted() {
        let query = SearchQuery::new().with_sort("parameter", SortOrder::None);
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_sort_multiple_fields_in_order() {
        let query = SearchQuery::new()
            .with_sort("parameter1", SortOrder::Ascending)
            .with_sort("parameter2", SortOrder::Descending);
        assert_eq!(
            query.to_query_string(),
            "$sort[parameter1]=1&$sort[parameter2]=-1"
        );
    }

    #[test]
    fn test_select() {
        let query = SearchQuery::new()
            .with_select("parameter1")
            .with_select("parameter2");
        assert_eq!(
            query.to_query_string(),
            "$select[]=parameter1&$select[]=parameter2"
        );
    }

    #[test]
    fn test_paths_are_camel_cased_per_segment() {
        let query = SearchQuery::new()
            .with_sort("Name.Fr", SortOrder::Ascending)
            .with_select("RealWeight");
        assert_eq!(
            query.to_query_string(),
            "$sort[name.fr]=1&$select[]=realWeight"
        );
    }

    #[test]
    fn test_single_value_leaves() {
        let cases = [
            (SearchPredicate::eq("parameter", "value"), "parameter[$eq]=value"),
            (SearchPredicate::not_eq("parameter", "value"), "parameter[$neq]=value"),
            (SearchPredicate::gt("parameter", "value"), "parameter[$gt]=value"),
            (SearchPredicate::gte("parameter", "value"), "parameter[$gte]=value"),
            (SearchPredicate::lt("parameter", "value"), "parameter[$lt]=value"),
            (SearchPredicate::lte("parameter", "value"), "parameter[$lte]=value"),
        ];
        for (predicate, expected) in cases {
            assert_eq!(predicates(vec![predicate]).to_query_string(), expected);
        }
    }

    #[test]
    fn test_set_leaves_repeat_per_value() {
        assert_eq!(
            predicates(vec![SearchPredicate::is_in("parameter", ["value1", "value2"])])
                .to_query_string(),
            "parameter[$in][]=value1&parameter[$in][]=value2"
        );
        assert_eq!(
            predicates(vec![SearchPredicate::not_in("parameter", ["value1", "value2"])])
                .to_query_string(),
            "parameter[$nin][]=value1&parameter[$nin][]=value2"
        );
    }

    #[test]
    fn test_and() {
        let query = predicates(vec![SearchPredicate::and([
            SearchPredicate::eq("p1", "v1"),
            SearchPredicate::not_eq("p2", "v2"),
        ])]);
        assert_eq!(
            query.to_query_string(),
            "$and[0][p1][$eq]=v1&$and[1][p2][$neq]=v2"
        );
    }

    #[test]
    fn test_or() {
        let query = predicates(vec![SearchPredicate::or([
            SearchPredicate::eq("parameter1", "value1"),
            SearchPredicate::not_eq("parameter2", "value2"),
        ])]);
        assert_eq!(
            query.to_query_string(),
            "$or[0][parameter1][$eq]=value1&$or[1][parameter2][$neq]=value2"
        );
    }

    #[test]
    fn test_nested_composites() {
        let query = predicates(vec![
            SearchPredicate::or([
                SearchPredicate::is_in("parameter1", ["value11", "value12"]),
                SearchPredicate::and([
                    SearchPredicate::eq("parameter2", "value2"),
                    SearchPredicate::gt("parameter3", "value3"),
                    SearchPredicate::not_in("parameter4", ["value41", "value42"]),
                ]),
            ]),
            SearchPredicate::is_in("parameter5", ["value51", "value52"]),
        ]);

        assert_eq!(
            query.to_query_string(),
            concat!(
                "$or[0][parameter1][$in][]=value11&",
                "$or[0][parameter1][$in][]=value12&",
                "$or[1][$and][0][parameter2][$eq]=value2&",
                "$or[1][$and][1][parameter3][$gt]=value3&",
                "$or[1][$and][2][parameter4][$nin][]=value41&",
                "$or[1][$and][2][parameter4][$nin][]=value42&",
                "parameter5[$in][]=value51&",
                "parameter5[$in][]=value52"
            )
        );
    }

    #[test]
    fn test_dotted_field_top_level_vs_nested() {
        let top = predicates(vec![SearchPredicate::eq("name.fr", "Coiffe")]);
        assert_eq!(top.to_query_string(), "name.fr[$eq]=Coiffe");

        let nested = predicates(vec![SearchPredicate::or([
            SearchPredicate::eq("name.fr", "Coiffe"),
            SearchPredicate::eq("name.en", "Hat"),
        ])]);
        assert_eq!(
            nested.to_query_string(),
            "$or[0][name][fr][$eq]=Coiffe&$or[1][name][en][$eq]=Hat"
        );
    }

    #[test]
    fn test_values_are_url_encoded_keys_are_not() {
        let query = predicates(vec![SearchPredicate::eq("name.fr", "Coiffe & Cape=1")]);
        assert_eq!(
            query.to_query_string(),
            "name.fr[$eq]=Coiffe+%26+Cape%3D1"
        );
    }

    #[test]
    fn test_full_emission_order() {
        let query = SearchQuery::new()
            .with_predicate(SearchPredicate::gte("level", "10"))
            .with_select("name")
            .with_sort("level", SortOrder::Ascending)
            .with_skip(5)
            .with_limit(2);
        assert_eq!(
            query.to_query_string(),
            "$limit=2&$skip=5&$sort[level]=1&$select[]=name&level[$gte]=10"
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let query = predicates(vec![SearchPredicate::or([
            SearchPredicate::is_in("a", ["1", "2"]),
            SearchPredicate::lt("b", "3"),
        ])])
        .with_sort("b", SortOrder::Descending);
        assert_eq!(query.to_query_string(), query.clone().to_query_string());
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("AppearanceId"), "appearanceId");
        assert_eq!(camel_case("appearanceId"), "appearanceId");
        assert_eq!(camel_case("$eq"), "$eq");
        assert_eq!(camel_case(""), "");
        assert_eq!(camel_case("  "), "");
        assert_eq!(camel_case_path("Name.Fr"), "name.fr");
    }
}
