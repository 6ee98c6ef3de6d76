//! Reader tests against a local axum server on an ephemeral port

use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use dofusdb_client::prelude::*;
use futures::StreamExt;
use serde_json::{json, Value as JsonValue};

const TOTAL: u64 = 5;
const PAGE_SIZE: u64 = 2;

#[derive(Clone, Default)]
struct ServerState {
    queries: Arc<Mutex<Vec<Option<String>>>>,
}

impl ServerState {
    fn queries(&self) -> Vec<Option<String>> {
        self.queries.lock().unwrap().clone()
    }
}

fn param(params: &str, name: &str) -> Option<u64> {
    params
        .split('&')
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('=')?.parse().ok())
}

async fn search_items(State(state): State<ServerState>, RawQuery(query): RawQuery) -> Json<JsonValue> {
    state.queries.lock().unwrap().push(query.clone());

    let params = query.unwrap_or_default();
    let limit = param(&params, "$limit").unwrap_or(PAGE_SIZE).min(PAGE_SIZE);
    let skip = param(&params, "$skip").unwrap_or(0);
    let data: Vec<JsonValue> = (skip..(skip + limit).min(TOTAL))
        .map(|id| json!({ "id": id, "level": id * 10, "name": { "fr": format!("Objet {}", id) } }))
        .collect();

    Json(json!({ "total": TOTAL, "limit": limit, "skip": skip, "data": data }))
}

async fn get_item(Path(id): Path<i32>) -> Json<JsonValue> {
    Json(json!({ "id": id, "name": { "fr": "Coiffe du Bouftou" }, "itemSet": false }))
}

async fn unavailable() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "maintenance")
}

async fn not_json() -> &'static str {
    "<html>definitely not json</html>"
}

async fn spawn_server() -> (DofusDbClientsFactory, ServerState) {
    let state = ServerState::default();
    let app = Router::new()
        .route("/items/", get(search_items))
        .route("/items/{id}", get(get_item))
        .route("/item-types/", get(unavailable))
        .route("/item-sets/", get(not_json))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let factory = DofusDbClientsFactory::new(&format!("http://{}", addr)).unwrap();
    (factory, state)
}

#[tokio::test]
async fn test_get_by_id() {
    let (factory, _) = spawn_server().await;

    let item = factory.items().get(44).await.unwrap();
    assert_eq!(item.id, Some(44));
    assert_eq!(item.name.and_then(|n| n.fr).as_deref(), Some("Coiffe du Bouftou"));
    assert_eq!(item.item_set, Some(ValueOrFalse::False));
}

#[tokio::test]
async fn test_search_sends_serialized_query() {
    let (factory, state) = spawn_server().await;
    let query = SearchQuery::new()
        .with_limit(2)
        .with_predicate(SearchPredicate::eq("name.fr", "Coiffe du Bouftou"));

    let page = factory.items().search(&query).await.unwrap();
    assert_eq!(page.total, TOTAL);
    assert_eq!(page.data.len(), 2);
    assert_eq!(
        state.queries(),
        vec![Some("$limit=2&name.fr[$eq]=Coiffe+du+Bouftou".to_string())]
    );
}

#[tokio::test]
async fn test_empty_query_has_no_query_string() {
    let (factory, state) = spawn_server().await;

    factory.items().search(&SearchQuery::new()).await.unwrap();
    assert_eq!(state.queries(), vec![None]);
}

#[tokio::test]
async fn test_count_reads_total_with_zero_limit() {
    let (factory, state) = spawn_server().await;

    assert_eq!(factory.items().count().await.unwrap(), TOTAL);
    assert_eq!(state.queries(), vec![Some("$limit=0".to_string())]);
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let (factory, _) = spawn_server().await;

    let err = factory.item_types().search(&SearchQuery::new()).await.unwrap_err();
    match &err {
        Error::Transport {
            url,
            status,
            message,
        } => {
            assert!(url.ends_with("/item-types/"));
            assert_eq!(*status, Some(503));
            assert!(message.contains("maintenance"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_retriable());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (factory, _) = spawn_server().await;

    let err = factory.item_sets().search(&SearchQuery::new()).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(!err.is_retriable());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let factory = DofusDbClientsFactory::new(&format!("http://{}", addr)).unwrap();
    let err = factory.items().count().await.unwrap_err();
    assert!(matches!(err, Error::Transport { status: None, .. }));
}

#[tokio::test]
async fn test_query_pages_through_server() {
    let (factory, state) = spawn_server().await;
    let provider = DofusDbQueryProvider::new(factory);

    let items: Vec<Item> = provider
        .items()
        .take(4)
        .execute()
        .map(|item| item.unwrap())
        .collect()
        .await;

    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![Some(0), Some(1), Some(2), Some(3)]);
    assert_eq!(
        state.queries(),
        vec![
            Some("$limit=4".to_string()),
            Some("$limit=2&$skip=2".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unbounded_query_drains_server_total() {
    let (factory, state) = spawn_server().await;
    let provider = DofusDbQueryProvider::new(factory);

    let results: Vec<_> = provider.items().skip(1).execute().collect().await;

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(
        state.queries(),
        vec![
            Some("$skip=1".to_string()),
            Some("$skip=3".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_query_count_sends_filters() {
    let (factory, state) = spawn_server().await;
    let provider = DofusDbQueryProvider::new(factory);

    let count = provider
        .items()
        .filter(|i| i.level().ge(10))
        .unwrap()
        .take(1)
        .count()
        .await
        .unwrap();

    assert_eq!(count, TOTAL);
    assert_eq!(
        state.queries(),
        vec![Some("$limit=0&level[$gte]=10".to_string())]
    );
}
