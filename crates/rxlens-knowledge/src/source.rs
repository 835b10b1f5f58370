//! Knowledge source contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Summary of the canonical page for a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub summary: String,
    pub url: String,
}

/// Common interface for all encyclopedia backends.
///
/// Implementations must not panic on unknown terms; every failure is one
/// of the [`LookupError`] variants.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Resolve a free-text term to a single summary.
    async fn summarize(&self, term: &str) -> Result<Summary, LookupError>;

    /// Backend name for logging and health output.
    fn name(&self) -> &str;
}

/// Source used when lookups are switched off. Every call is `Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

#[async_trait]
impl KnowledgeSource for OfflineSource {
    async fn summarize(&self, term: &str) -> Result<Summary, LookupError> {
        Err(LookupError::unavailable(term, "lookups are disabled (offline mode)"))
    }

    fn name(&self) -> &str {
        "offline"
    }
}
