use axum::extract::State;
use axum::Json;
use rxlens_data::LoadReport;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub records: usize,
    pub conditions: usize,
    pub drugs: usize,
    pub knowledge_source: String,
    pub load_report: LoadReport,
}

/// GET /api/health
pub async fn api_health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        records: state.store.len(),
        conditions: state.store.all_conditions().len(),
        drugs: state.store.all_drugs().len(),
        knowledge_source: state.knowledge.name().to_string(),
        load_report: state.store.load_report().clone(),
    })
}
