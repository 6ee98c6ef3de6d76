//! Pagination accumulator
//!
//! Turns one logical [`SearchQuery`] into as many page requests as it takes
//! to satisfy the requested `limit` (or to exhaust the server's `total` when
//! no limit is set), yielding resources lazily as pages arrive.
//!
//! Pages are fetched strictly one after the other: the window of each request
//! depends on how many items the previous one returned. The cancellation
//! token is checked before every request and aborts the request in flight.
//! Items already yielded stay yielded.

use std::sync::Arc;

use async_stream::stream;
use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::models::Resource;
use crate::search::SearchQuery;

/// Stream every resource matching `query`, paging as needed
///
/// A failed page yields one [`Error::Page`] carrying the serialized query
/// that was in flight, and ends the stream. Cancellation yields one
/// [`Error::Cancelled`] and ends the stream.
pub fn multi_query_search<R: Resource>(
    client: Arc<dyn ApiClient<R>>,
    query: SearchQuery,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<R>> + Send {
    stream! {
        let mut remaining = query.limit;
        let mut offset = query.skip.unwrap_or(0);
        let mut in_flight = query.clone();
        let mut fetched: u64 = 0;
        let mut pages: u64 = 0;

        loop {
            if cancel.is_cancelled() {
                tracing::debug!(resource = R::NAME, fetched, "Search cancelled before page request");
                yield Err(Error::Cancelled);
                return;
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = client.search(&in_flight) => Some(result),
            };

            let page = match outcome {
                Some(Ok(page)) => page,
                Some(Err(e)) => {
                    yield Err(Error::page(in_flight.to_query_string(), e));
                    return;
                }
                None => {
                    tracing::debug!(resource = R::NAME, fetched, "Search cancelled during page request");
                    yield Err(Error::Cancelled);
                    return;
                }
            };

            let count = page.data.len() as u64;
            let total = page.total;
            pages += 1;
            tracing::debug!(
                resource = R::NAME,
                limit = ?in_flight.limit,
                skip = ?in_flight.skip,
                count,
                total,
                "Fetched page"
            );

            for item in page.data {
                yield Ok(item);
            }

            fetched += count;
            offset += count;
            if let Some(remaining) = remaining.as_mut() {
                *remaining = remaining.saturating_sub(count);
            }

            // An empty page while offset < total would otherwise loop forever
            if count == 0 || offset >= total || remaining == Some(0) {
                break;
            }

            in_flight = query.page(remaining, Some(offset));
        }

        tracing::info!(resource = R::NAME, fetched, pages, "Search complete");
    }
}
