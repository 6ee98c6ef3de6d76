//! Fluent, typed query builder
//!
//! [`DofusDbQuery`] accumulates limit, skip, sort, select and filters written
//! against a resource's field view, then runs them through the pagination
//! accumulator. Every call consumes the builder and returns a new one; clone a
//! base query to start independent executions from it.
//!
//! # Example
//!
//! ```rust,no_run
//! use dofusdb_client::query::DofusDbQueryProvider;
//! use futures::StreamExt;
//!
//! # async fn example() -> dofusdb_client::error::Result<()> {
//! let hats = DofusDbQueryProvider::production()?
//!     .items()
//!     .filter(|i| i.type_id().eq(16) & i.level().ge(100))?
//!     .sort_by_descending(|i| i.level())?
//!     .select(|i| i.name().fr())?
//!     .take(20);
//!
//! let mut results = std::pin::pin!(hats.execute());
//! while let Some(item) = results.next().await {
//!     println!("{:?}", item?.name);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::client::{ApiClient, DofusDbClientsFactory};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::expr::{compile, Expr, Fields, Lambda};
use crate::models::{Item, ItemSet, ItemSuperType, ItemType, Resource};
use crate::paginate::multi_query_search;
use crate::search::{SearchPredicate, SearchQuery, SortOrder};

/// Name of the parameter selector closures are rooted at
const SUBJECT: &str = "i";

/// A query over the resource collection `R`
pub struct DofusDbQuery<R: Resource> {
    client: Arc<dyn ApiClient<R>>,
    query: SearchQuery,
}

impl<R: Resource> Clone for DofusDbQuery<R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            query: self.query.clone(),
        }
    }
}

impl<R: Resource> std::fmt::Debug for DofusDbQuery<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DofusDbQuery")
            .field("resource", &R::NAME)
            .field("query", &self.query)
            .finish()
    }
}

impl<R: Resource> DofusDbQuery<R> {
    pub fn new(client: Arc<dyn ApiClient<R>>) -> Self {
        Self {
            client,
            query: SearchQuery::new(),
        }
    }

    /// Return at most `count` results in total
    #[must_use]
    pub fn take(mut self, count: u64) -> Self {
        self.query.limit = Some(count);
        self
    }

    #[must_use]
    pub fn skip(mut self, count: u64) -> Self {
        self.query.skip = Some(count);
        self
    }

    pub fn sort_by_ascending<S, F>(self, selector: F) -> Result<Self>
    where
        S: Fields,
        F: FnOnce(R::Fields) -> S,
    {
        self.sort_by(selector, SortOrder::Ascending)
    }

    pub fn sort_by_descending<S, F>(self, selector: F) -> Result<Self>
    where
        S: Fields,
        F: FnOnce(R::Fields) -> S,
    {
        self.sort_by(selector, SortOrder::Descending)
    }

    fn sort_by<S, F>(mut self, selector: F, order: SortOrder) -> Result<Self>
    where
        S: Fields,
        F: FnOnce(R::Fields) -> S,
    {
        let path = compile::property_path(&lambda::<R, _, _>(selector))?;
        self.query = self.query.with_sort(path, order);
        Ok(self)
    }

    /// Project a field; may be called repeatedly
    pub fn select<S, F>(mut self, selector: F) -> Result<Self>
    where
        S: Fields,
        F: FnOnce(R::Fields) -> S,
    {
        let path = compile::property_path(&lambda::<R, _, _>(selector))?;
        self.query = self.query.with_select(path);
        Ok(self)
    }

    /// Add a filter; all filters must hold
    pub fn filter<F>(self, condition: F) -> Result<Self>
    where
        F: FnOnce(R::Fields) -> Expr,
    {
        let predicate = compile::predicate(&lambda::<R, _, _>(condition))?;
        Ok(self.predicate(predicate))
    }

    /// Add a hand-built filter
    #[must_use]
    pub fn predicate(mut self, predicate: SearchPredicate) -> Self {
        self.query = self.query.with_predicate(predicate);
        self
    }

    /// The query that [`execute`](Self::execute) would run
    pub fn build(&self) -> SearchQuery {
        self.query.clone()
    }

    pub fn client(&self) -> &Arc<dyn ApiClient<R>> {
        &self.client
    }

    /// Stream every matching resource, paging as needed
    pub fn execute(&self) -> impl Stream<Item = Result<R>> + Send {
        self.execute_with_cancellation(CancellationToken::new())
    }

    pub fn execute_with_cancellation(
        &self,
        cancel: CancellationToken,
    ) -> impl Stream<Item = Result<R>> + Send {
        multi_query_search(Arc::clone(&self.client), self.build(), cancel)
    }

    /// Number of resources matching the filters, ignoring take and skip
    pub async fn count(&self) -> Result<u64> {
        let query = self.query.page(Some(0), None);
        let result = self.client.search(&query).await?;
        Ok(result.total)
    }
}

fn lambda<R, S, F>(selector: F) -> Lambda
where
    R: Resource,
    S: Fields,
    F: FnOnce(R::Fields) -> S,
{
    let subject = R::Fields::from_expr(Expr::parameter(SUBJECT));
    Lambda::new(SUBJECT, selector(subject).into_expr())
}

/// Entry point handing out one [`DofusDbQuery`] per resource collection
#[derive(Debug, Clone)]
pub struct DofusDbQueryProvider {
    factory: DofusDbClientsFactory,
}

impl DofusDbQueryProvider {
    pub fn new(factory: DofusDbClientsFactory) -> Self {
        Self { factory }
    }

    /// Queries against `https://api.dofusdb.fr/`
    pub fn production() -> Result<Self> {
        Ok(Self::new(DofusDbClientsFactory::production()?))
    }

    /// Queries against `https://api.beta.dofusdb.fr/`
    pub fn beta() -> Result<Self> {
        Ok(Self::new(DofusDbClientsFactory::beta()?))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(DofusDbClientsFactory::from_config(config)?))
    }

    pub fn query<R: Resource>(&self) -> DofusDbQuery<R> {
        DofusDbQuery::new(Arc::new(self.factory.client::<R>()))
    }

    pub fn items(&self) -> DofusDbQuery<Item> {
        self.query()
    }

    pub fn item_types(&self) -> DofusDbQuery<ItemType> {
        self.query()
    }

    pub fn item_super_types(&self) -> DofusDbQuery<ItemSuperType> {
        self.query()
    }

    pub fn item_sets(&self) -> DofusDbQuery<ItemSet> {
        self.query()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn items() -> DofusDbQuery<Item> {
        DofusDbQueryProvider::production().unwrap().items()
    }

    #[test]
    fn test_build_collects_everything() {
        let query = items()
            .take(20)
            .skip(5)
            .sort_by_descending(|i| i.level())
            .unwrap()
            .select(|i| i.name().fr())
            .unwrap()
            .filter(|i| i.type_id().eq(16))
            .unwrap()
            .build();

        assert_eq!(query.limit, Some(20));
        assert_eq!(query.skip, Some(5));
        assert_eq!(query.sort, vec![("level".to_string(), SortOrder::Descending)]);
        assert_eq!(query.select, vec!["name.fr".to_string()]);
        assert_eq!(query.predicates, vec![SearchPredicate::eq("typeId", "16")]);
    }

    #[test]
    fn test_sort_same_path_overwrites_in_place() {
        let query = items()
            .sort_by_ascending(|i| i.level())
            .unwrap()
            .sort_by_ascending(|i| i.name().en())
            .unwrap()
            .sort_by_descending(|i| i.level())
            .unwrap()
            .build();

        assert_eq!(
            query.sort,
            vec![
                ("level".to_string(), SortOrder::Descending),
                ("name.en".to_string(), SortOrder::Ascending),
            ]
        );
    }

    #[test]
    fn test_filter_with_membership_and_negation() {
        let query = items()
            .filter(|i| !(i.level().lt(10) | i.type_id().is_in([1, 2])))
            .unwrap()
            .build();

        assert_eq!(
            query.predicates,
            vec![SearchPredicate::and([
                SearchPredicate::gte("level", "10"),
                SearchPredicate::not_in("typeId", ["1", "2"]),
            ])]
        );
    }

    #[test]
    fn test_filter_on_nested_string_field() {
        let query = items()
            .filter(|i| i.name().fr().eq("Coiffe du Bouftou"))
            .unwrap()
            .build();

        assert_eq!(
            query.to_query_string(),
            "name.fr[$eq]=Coiffe+du+Bouftou"
        );
    }

    #[test]
    fn test_negated_disjunction_joins_the_outer_and() {
        let query = items()
            .filter(|i| !(i.level().lt(10) | i.type_id().eq(1)) & i.price().gt(0))
            .unwrap()
            .build();

        assert_eq!(
            query.to_query_string(),
            "$and[0][level][$gte]=10&$and[1][typeId][$neq]=1&$and[2][price][$gt]=0"
        );
    }

    #[test]
    fn test_filter_rejects_non_predicate() {
        let err = items()
            .filter(|i| i.level().into_expr())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidExpression { ref expression, .. } if expression == "i.level"));
    }

    #[test]
    fn test_builder_clones_are_independent() {
        let base = items().filter(|i| i.level().gt(100)).unwrap();
        let first = base.clone().take(1);
        let second = base.clone().sort_by_ascending(|i| i.price()).unwrap();

        assert_eq!(base.build().limit, None);
        assert_eq!(first.build().limit, Some(1));
        assert!(first.build().sort.is_empty());
        assert_eq!(second.build().sort.len(), 1);
        assert_eq!(second.build().predicates, base.build().predicates);
    }
}
