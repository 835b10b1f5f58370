//! Canned knowledge source for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LookupError;
use crate::source::{KnowledgeSource, Summary};

/// In-memory source with canned outcomes. Unknown terms are `NotFound`.
#[derive(Default)]
pub struct MockKnowledgeSource {
    outcomes: HashMap<String, Result<Summary, LookupError>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl MockKnowledgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `term` to a page with the given summary.
    pub fn with_summary(mut self, term: &str, summary: &str, url: &str) -> Self {
        self.outcomes.insert(
            term.to_string(),
            Ok(Summary {
                title: term.to_string(),
                summary: summary.to_string(),
                url: url.to_string(),
            }),
        );
        self
    }

    pub fn with_ambiguous(mut self, term: &str, candidates: &[&str]) -> Self {
        self.outcomes.insert(
            term.to_string(),
            Err(LookupError::Ambiguous {
                term: term.to_string(),
                candidates: candidates.iter().map(|c| c.to_string()).collect(),
            }),
        );
        self
    }

    pub fn with_unavailable(mut self, term: &str, reason: &str) -> Self {
        self.outcomes
            .insert(term.to_string(), Err(LookupError::unavailable(term, reason)));
        self
    }

    /// Sleep before answering for `term`.
    pub fn with_delay(mut self, term: &str, delay: Duration) -> Self {
        self.delays.insert(term.to_string(), delay);
        self
    }

    /// Number of `summarize` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeSource for MockKnowledgeSource {
    async fn summarize(&self, term: &str) -> Result<Summary, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(term) {
            tokio::time::sleep(*delay).await;
        }

        self.outcomes
            .get(term)
            .cloned()
            .unwrap_or_else(|| Err(LookupError::NotFound { term: term.to_string() }))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
