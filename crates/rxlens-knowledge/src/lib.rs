//! rxlens-knowledge — Free-text term to encyclopedia summary resolution.
//!
//! A [`KnowledgeSource`] turns a condition or drug name into a short
//! summary and a canonical URL, or a closed [`LookupError`] explaining why
//! it could not (ambiguous term, no page, source unreachable). The
//! [`fanout`] helpers run several lookups concurrently, each bounded by its
//! own timeout, so one slow call never holds back the others.

pub mod error;
pub mod fanout;
pub mod mock;
pub mod source;
pub mod wikipedia;

use std::sync::Arc;

use rxlens_common::{KnowledgeConfig, KnowledgeProvider, RxLensError};

pub use error::LookupError;
pub use fanout::{lookup_all, lookup_stream, lookup_with_timeout, LookupOutcome, LookupRequest};
pub use mock::MockKnowledgeSource;
pub use source::{KnowledgeSource, OfflineSource, Summary};
pub use wikipedia::WikipediaClient;

/// Build the configured knowledge source.
pub fn from_config(config: &KnowledgeConfig) -> Result<Arc<dyn KnowledgeSource>, RxLensError> {
    match config.provider {
        KnowledgeProvider::Wikipedia => Ok(Arc::new(WikipediaClient::from_config(config)?)),
        KnowledgeProvider::Offline => Ok(Arc::new(OfflineSource)),
    }
}
