//! Concurrent, timeout-bound lookups.
//!
//! Every request is its own future wrapped in `tokio::time::timeout`. A
//! request that elapses becomes `LookupError::Unavailable`; the others are
//! unaffected. Dropping the returned future or stream cancels whatever is
//! still in flight.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{join_all, BoxFuture};
use futures_util::stream::{FuturesUnordered, Stream};
use futures_util::FutureExt;
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::source::{KnowledgeSource, Summary};

/// One term to resolve, tagged with a caller-defined key.
#[derive(Debug, Clone)]
pub struct LookupRequest<K> {
    pub key: K,
    pub term: String,
}

impl<K> LookupRequest<K> {
    pub fn new(key: K, term: impl Into<String>) -> Self {
        Self { key, term: term.into() }
    }
}

#[derive(Debug, Clone)]
pub struct LookupOutcome<K> {
    pub key: K,
    pub term: String,
    pub result: Result<Summary, LookupError>,
}

/// Resolve one term, giving up after `timeout`.
pub async fn lookup_with_timeout(
    source: &dyn KnowledgeSource,
    term: &str,
    timeout: Duration,
) -> Result<Summary, LookupError> {
    match tokio::time::timeout(timeout, source.summarize(term)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(term, source = source.name(), ?timeout, "Knowledge lookup timed out");
            Err(LookupError::unavailable(
                term,
                format!("timed out after {} ms", timeout.as_millis()),
            ))
        }
    }
}

/// Resolve all requests concurrently. Outcomes come back in request order.
pub async fn lookup_all<K>(
    source: &dyn KnowledgeSource,
    requests: Vec<LookupRequest<K>>,
    timeout: Duration,
) -> Vec<LookupOutcome<K>> {
    debug!(count = requests.len(), source = source.name(), "Running knowledge lookups");

    join_all(requests.into_iter().map(move |req| async move {
        let result = lookup_with_timeout(source, &req.term, timeout).await;
        LookupOutcome { key: req.key, term: req.term, result }
    }))
    .await
}

/// Resolve all requests concurrently, yielding each outcome as soon as it
/// is ready (completion order, not request order).
pub fn lookup_stream<K>(
    source: Arc<dyn KnowledgeSource>,
    requests: Vec<LookupRequest<K>>,
    timeout: Duration,
) -> impl Stream<Item = LookupOutcome<K>> + Send + 'static
where
    K: Send + 'static,
{
    requests
        .into_iter()
        .map(|req| {
            let source = Arc::clone(&source);
            async move {
                let result = lookup_with_timeout(source.as_ref(), &req.term, timeout).await;
                LookupOutcome { key: req.key, term: req.term, result }
            }
            .boxed()
        })
        .collect::<FuturesUnordered<BoxFuture<'static, LookupOutcome<K>>>>()
}
