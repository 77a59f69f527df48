use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};

use crate::{services::market_monitor, AppState};

// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Response {
    let snap = state.dashboard.read().await.clone();
    Json(snap).into_response()
}

// POST /api/dashboard/refresh
pub async fn post_refresh(State(state): State<AppState>) -> Response {
    // a failed fetch is recorded in the snapshot's `error`
    if let Err(e) = market_monitor::refresh(&state).await {
        tracing::warn!("manual refresh failed: {}", e);
    }

    let snap = state.dashboard.read().await.clone();
    Json(snap).into_response()
}
