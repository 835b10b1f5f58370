//! Selector option endpoints.

use axum::extract::{Query, State};
use axum::Json;
use rxlens_explore::{condition_options, drugs_for_condition, SelectorOptions};
use serde::Deserialize;

use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct DrugsQuery {
    pub condition: String,
}

/// GET /api/conditions
pub async fn api_conditions(State(state): State<SharedState>) -> Json<SelectorOptions> {
    Json(condition_options(&state.store))
}

/// GET /api/drugs?condition=Flu
pub async fn api_drugs(
    State(state): State<SharedState>,
    Query(q): Query<DrugsQuery>,
) -> Json<SelectorOptions> {
    Json(drugs_for_condition(&state.store, &q.condition))
}
