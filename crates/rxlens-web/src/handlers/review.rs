//! Review panel endpoints.
//!
//! Both take the current male and female chart clicks. A click that matches
//! no review contributes nothing, not even a lookup.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use rxlens_common::ApiError;
use rxlens_data::{DatasetStore, ReviewRecord, Sex};
use rxlens_explore::{lookup_requests, render_panel, resolve_click, ClickPoint, Fragment};
use rxlens_knowledge::lookup_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sse::{panel_events, panel_sse};
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub male: Option<ClickPoint>,
    #[serde(default)]
    pub female: Option<ClickPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub fragments: Vec<Fragment>,
}

/// Query form of [`ReviewRequest`]: each click is a JSON-encoded `ClickPoint`.
#[derive(Debug, Deserialize)]
pub struct ReviewStreamQuery {
    pub male: Option<String>,
    pub female: Option<String>,
}

impl ReviewStreamQuery {
    fn parse(self) -> Result<ReviewRequest, ApiError> {
        fn click(sex: &str, raw: Option<String>) -> Result<Option<ClickPoint>, ApiError> {
            raw.filter(|s| !s.trim().is_empty())
                .map(|s| {
                    serde_json::from_str(&s)
                        .map_err(|e| ApiError::BadRequest(format!("invalid {} click: {}", sex, e)))
                })
                .transpose()
        }

        Ok(ReviewRequest {
            male: click("male", self.male)?,
            female: click("female", self.female)?,
        })
    }
}

/// Reviews behind the clicks, male first.
fn resolve<'a>(store: &'a DatasetStore, request: ReviewRequest) -> Vec<&'a ReviewRecord> {
    let clicks = [
        request.male.map(|p| p.on(Sex::Male)),
        request.female.map(|p| p.on(Sex::Female)),
    ];
    clicks
        .iter()
        .flatten()
        .filter_map(|click| resolve_click(store, click))
        .collect()
}

/// POST /api/review - the whole panel once every lookup has finished or timed out
pub async fn api_review(
    State(state): State<SharedState>,
    Json(request): Json<ReviewRequest>,
) -> Json<ReviewResponse> {
    let resolved = resolve(&state.store, request);
    let requests = resolved.iter().flat_map(|r| lookup_requests(r)).collect();
    let outcomes = lookup_all(state.knowledge.as_ref(), requests, state.lookup_timeout).await;
    debug!(reviews = resolved.len(), lookups = outcomes.len(), "Rendered review panel");

    Json(ReviewResponse { fragments: render_panel(&resolved, &outcomes) })
}

/// GET /api/review/stream?male=<json>&female=<json> - the panel as SSE
pub async fn api_review_stream(
    State(state): State<SharedState>,
    Query(query): Query<ReviewStreamQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = query.parse()?;
    let resolved: Vec<ReviewRecord> = resolve(&state.store, request).into_iter().cloned().collect();
    debug!(reviews = resolved.len(), "Streaming review panel");

    Ok(panel_sse(panel_events(&state, resolved)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_query_parsing() {
        let query = ReviewStreamQuery {
            male: Some(r#"{"condition":"Flu","drug":"X","satisfaction":5}"#.into()),
            female: Some(String::new()),
        };
        let request = query.parse().unwrap();
        assert_eq!(request.male.unwrap().drug, "X");
        assert!(request.female.is_none());

        let bad = ReviewStreamQuery { male: Some("{not json".into()), female: None };
        assert!(matches!(bad.parse(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_resolve_orders_male_first_and_skips_unmatched() {
        let store = DatasetStore::from_records(vec![
            ReviewRecord::new("Flu", "Y", Sex::Female, None, 3.0, "bad"),
            ReviewRecord::new("Flu", "X", Sex::Male, None, 5.0, "good"),
        ]);
        let point = |drug: &str, satisfaction| ClickPoint {
            condition: "Flu".into(),
            drug: drug.into(),
            satisfaction,
        };

        let both = resolve(
            &store,
            ReviewRequest { male: Some(point("X", 5.0)), female: Some(point("Y", 3.0)) },
        );
        let reviews: Vec<_> = both.iter().map(|r| r.reviews.as_str()).collect();
        assert_eq!(reviews, vec!["good", "bad"]);

        let unmatched = resolve(&store, ReviewRequest { male: Some(point("Y", 3.0)), female: None });
        assert!(unmatched.is_empty());
    }
}
