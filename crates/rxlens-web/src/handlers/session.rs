//! Session endpoints. The client holds the `ExplorerState` and posts it
//! back with each event; the server keeps nothing between requests.

use axum::extract::State;
use axum::Json;
use rxlens_explore::{ExplorerState, ExplorerView, SelectionEvent};
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub state: ExplorerState,
    pub view: ExplorerView,
}

#[derive(Debug, Deserialize)]
pub struct SessionUpdate {
    pub state: ExplorerState,
    pub event: SelectionEvent,
}

impl SessionResponse {
    fn render(state: ExplorerState, store: &rxlens_data::DatasetStore) -> Self {
        let view = state.view(store);
        Self { state, view }
    }
}

/// GET /api/session - initial state and view
pub async fn api_session(State(state): State<SharedState>) -> Json<SessionResponse> {
    let initial = ExplorerState::initial(&state.store);
    Json(SessionResponse::render(initial, &state.store))
}

/// POST /api/session - apply one event
pub async fn api_session_update(
    State(state): State<SharedState>,
    Json(update): Json<SessionUpdate>,
) -> Json<SessionResponse> {
    let next = update.state.apply(&state.store, update.event);
    Json(SessionResponse::render(next, &state.store))
}
