//! Chart data endpoint.

use axum::extract::{Query, State};
use axum::Json;
use rxlens_explore::{project, records_for, Projection};
use serde::Deserialize;
use tracing::debug;

use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ChartsQuery {
    pub condition: String,
    pub drug: String,
}

/// GET /api/charts?condition=Flu&drug=Tamiflu
pub async fn api_charts(
    State(state): State<SharedState>,
    Query(q): Query<ChartsQuery>,
) -> Json<Projection> {
    let records = records_for(&state.store, &q.condition, &q.drug);
    let projection = project(records);
    debug!(
        condition = %q.condition,
        drug = %q.drug,
        male = projection.male.len(),
        female = projection.female.len(),
        dropped = projection.dropped,
        "Projected charts"
    );
    Json(projection)
}
