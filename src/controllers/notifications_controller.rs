use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{models::SettingsUpdate, AppState};

// GET /api/notifications/settings
pub async fn get_settings(State(state): State<AppState>) -> Response {
    Json(state.store.notification_settings()).into_response()
}

// PATCH /api/notifications/settings
pub async fn patch_settings(State(state): State<AppState>, Json(update): Json<SettingsUpdate>) -> Response {
    match state.store.update_notification_settings(update) {
        Ok(s) => Json(s).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("store error: {e}") })),
        )
            .into_response(),
    }
}

// GET /api/notifications/status
pub async fn get_status(State(state): State<AppState>) -> Response {
    Json(state.notifier.status()).into_response()
}

// POST /api/notifications/permission
pub async fn post_request_permission(State(state): State<AppState>) -> Response {
    let permission = state.notifier.request_permission().await;

    // granting permission is how the user switches alerts on
    if permission.is_granted() {
        let update = SettingsUpdate {
            enabled: Some(true),
            ..Default::default()
        };
        if let Err(e) = state.store.update_notification_settings(update) {
            tracing::error!("could not enable notifications: {}", e);
        }
    }

    Json(json!({
        "permission": permission,
        "settings": state.store.notification_settings(),
    }))
    .into_response()
}

// POST /api/notifications/test
pub async fn post_test_notification(State(state): State<AppState>) -> Response {
    let sent = state.notifier.send_test_notification().await;
    Json(json!({ "sent": sent })).into_response()
}
