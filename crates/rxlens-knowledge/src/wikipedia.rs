//! Wikipedia client over the MediaWiki Action API.
//!
//! Endpoint: https://en.wikipedia.org/w/api.php
//!
//! Resolution order for a term:
//!   1. exact title query (redirects followed)
//!   2. if the page is missing, the top full-text search hit, falling back
//!      to the search spelling suggestion
//!
//! A page carrying the `disambiguation` page property is reported as
//! ambiguous together with the article titles it links to.
//!
//! Terms holding characters MediaWiki forbids in titles (`|` separates
//! titles, `#` starts a fragment) skip step 1 and go straight to search.

use async_trait::async_trait;
use rxlens_common::{KnowledgeConfig, RxLensError, SandboxClient};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::LookupError;
use crate::source::{KnowledgeSource, Summary};

const PAGE_PROPS: &str = "extracts|info|pageprops|links";

const ILLEGAL_TITLE_CHARS: &[char] = &['|', '#', '[', ']', '{', '}', '<', '>'];

pub struct WikipediaClient {
    client: SandboxClient,
    base_url: String,
    candidate_limit: usize,
}

/// What a title query resolved to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PageOutcome {
    Found(Summary),
    Ambiguous(Vec<String>),
    Missing,
}

impl WikipediaClient {
    pub fn new(
        client: SandboxClient,
        base_url: impl Into<String>,
        candidate_limit: usize,
    ) -> Result<Self, RxLensError> {
        let base_url = base_url.into();
        if !client.is_allowed(&base_url) {
            return Err(RxLensError::Security(format!(
                "knowledge base URL {} is not in the allowlist",
                base_url
            )));
        }
        Ok(Self { client, base_url, candidate_limit: candidate_limit.max(1) })
    }

    pub fn from_config(config: &KnowledgeConfig) -> Result<Self, RxLensError> {
        let client = SandboxClient::new(config.timeout(), &config.user_agent)?;
        Self::new(client, config.base_url.clone(), config.candidate_limit)
    }

    /// Query one title: summary extract, canonical URL, and disambiguation links.
    #[instrument(skip(self))]
    async fn fetch_page(&self, term: &str, title: &str) -> Result<PageOutcome, LookupError> {
        let limit = self.candidate_limit.to_string();
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
            ("redirects", "1"),
            ("prop", PAGE_PROPS),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("inprop", "url"),
            ("ppprop", "disambiguation"),
            ("plnamespace", "0"),
            ("pllimit", limit.as_str()),
            ("titles", title),
        ];

        let body = self.get_json(term, &params).await?;
        classify_page(term, &body, self.candidate_limit)
    }

    /// Best title suggested by full-text search, if any.
    #[instrument(skip(self))]
    async fn search_title(&self, term: &str) -> Result<Option<String>, LookupError> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
            ("list", "search"),
            ("srsearch", term),
            ("srlimit", "1"),
            ("srinfo", "suggestion"),
            ("srprop", ""),
        ];

        let body = self.get_json(term, &params).await?;
        parse_search(term, &body)
    }

    async fn get_json(&self, term: &str, params: &[(&str, &str)]) -> Result<Value, LookupError> {
        let request = self
            .client
            .get(&self.base_url)
            .map_err(|e| LookupError::unavailable(term, e.to_string()))?;

        let resp = request.query(params).send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                "could not connect".to_string()
            } else {
                e.to_string()
            };
            LookupError::unavailable(term, reason)
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, term, "Wikipedia returned an error status");
            return Err(LookupError::unavailable(term, format!("HTTP {}", status)));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| LookupError::unavailable(term, format!("unreadable response: {}", e)))
    }
}

#[async_trait]
impl KnowledgeSource for WikipediaClient {
    async fn summarize(&self, term: &str) -> Result<Summary, LookupError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(LookupError::NotFound { term: String::new() });
        }

        let exact = if is_title_safe(term) {
            self.fetch_page(term, term).await?
        } else {
            debug!(term, "Term is not a valid title, searching instead");
            PageOutcome::Missing
        };

        let outcome = match exact {
            PageOutcome::Missing => match self.search_title(term).await? {
                Some(title) if title != term && is_title_safe(&title) => {
                    debug!(term, %title, "Exact title missing, trying search suggestion");
                    self.fetch_page(term, &title).await?
                }
                _ => PageOutcome::Missing,
            },
            other => other,
        };

        match outcome {
            PageOutcome::Found(summary) => {
                debug!(term, title = %summary.title, "Resolved Wikipedia summary");
                Ok(summary)
            }
            PageOutcome::Ambiguous(candidates) => Err(LookupError::Ambiguous {
                term: term.to_string(),
                candidates,
            }),
            PageOutcome::Missing => Err(LookupError::NotFound { term: term.to_string() }),
        }
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}

/// Whether `title` can be sent as a single `titles` value.
pub(crate) fn is_title_safe(title: &str) -> bool {
    !title.contains(ILLEGAL_TITLE_CHARS)
}

fn api_error(term: &str, body: &Value) -> Option<LookupError> {
    body.get("error").map(|err| {
        let info = err["info"].as_str().unwrap_or("API error");
        LookupError::unavailable(term, info)
    })
}

/// Classify a `prop=extracts|info|pageprops|links` response (formatversion 2).
pub(crate) fn classify_page(
    term: &str,
    body: &Value,
    candidate_limit: usize,
) -> Result<PageOutcome, LookupError> {
    if let Some(err) = api_error(term, body) {
        return Err(err);
    }

    let pages = body["query"]["pages"].as_array().map(Vec::as_slice).unwrap_or_default();
    let page = match pages {
        [] => return Err(LookupError::unavailable(term, "response has no pages")),
        [page] => page,
        several => {
            let titles = several
                .iter()
                .filter_map(|p| p["title"].as_str().map(String::from))
                .take(candidate_limit)
                .collect();
            return Ok(PageOutcome::Ambiguous(titles));
        }
    };

    if page["missing"].as_bool() == Some(true) || page["invalid"].as_bool() == Some(true) {
        return Ok(PageOutcome::Missing);
    }

    if page["pageprops"].get("disambiguation").is_some() {
        let candidates = page["links"]
            .as_array()
            .map(|links| {
                links
                    .iter()
                    .filter_map(|l| l["title"].as_str().map(String::from))
                    .take(candidate_limit)
                    .collect()
            })
            .unwrap_or_default();
        return Ok(PageOutcome::Ambiguous(candidates));
    }

    let title = page["title"].as_str().unwrap_or(term).to_string();
    let url = page["fullurl"]
        .as_str()
        .or_else(|| page["canonicalurl"].as_str())
        .unwrap_or_default()
        .to_string();

    Ok(PageOutcome::Found(Summary {
        title,
        summary: page["extract"].as_str().unwrap_or_default().trim().to_string(),
        url,
    }))
}

/// Pick the title to retry with from a `list=search` response.
pub(crate) fn parse_search(term: &str, body: &Value) -> Result<Option<String>, LookupError> {
    if let Some(err) = api_error(term, body) {
        return Err(err);
    }

    let top_hit = body["query"]["search"]
        .as_array()
        .and_then(|hits| hits.first())
        .and_then(|hit| hit["title"].as_str());
    let suggestion = body["query"]["searchinfo"]["suggestion"].as_str();

    Ok(top_hit.or(suggestion).map(String::from))
}
