use serde::Serialize;
use thiserror::Error;

/// Why a term could not be resolved to a single summary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupError {
    /// The term names several distinct topics.
    #[error("'{term}' may refer to several topics")]
    Ambiguous { term: String, candidates: Vec<String> },

    #[error("no page found for '{term}'")]
    NotFound { term: String },

    /// Network failure, timeout, or an unusable response.
    #[error("knowledge source unavailable for '{term}': {reason}")]
    Unavailable { term: String, reason: String },
}

impl LookupError {
    pub fn term(&self) -> &str {
        match self {
            LookupError::Ambiguous { term, .. }
            | LookupError::NotFound { term }
            | LookupError::Unavailable { term, .. } => term,
        }
    }

    pub fn unavailable(term: &str, reason: impl Into<String>) -> Self {
        LookupError::Unavailable { term: term.to_string(), reason: reason.into() }
    }
}
