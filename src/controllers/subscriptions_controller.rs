use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{
    events::ServerEvent,
    models::{NewSubscription, SubscriptionUpdate},
    AppState,
};

fn store_error(e: String) -> Response {
    tracing::error!("subscription store error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("store error: {e}") })),
    )
        .into_response()
}

fn notify_changed(state: &AppState) {
    let _ = state.events_tx.send(ServerEvent::signal("subscriptionsUpdated"));
}

// GET /api/subscriptions
pub async fn get_subscriptions(State(state): State<AppState>) -> Response {
    Json(state.store.subscriptions()).into_response()
}

// POST /api/subscriptions
pub async fn post_subscription(State(state): State<AppState>, Json(asset): Json<NewSubscription>) -> Response {
    if asset.id.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "id is required" }))).into_response();
    }

    let added = match state.store.add_subscription(asset) {
        Ok(a) => a,
        Err(e) => return store_error(e),
    };

    if added {
        notify_changed(&state);
    }

    let status = if added { StatusCode::CREATED } else { StatusCode::OK };
    (status, Json(state.store.subscriptions())).into_response()
}

// PATCH /api/subscriptions/:id
pub async fn patch_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<SubscriptionUpdate>,
) -> Response {
    match state.store.update_subscription(&id, update) {
        Ok(Some(sub)) => {
            notify_changed(&state);
            Json(sub).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("not subscribed to {id}") })),
        )
            .into_response(),
        Err(e) => store_error(e),
    }
}

// DELETE /api/subscriptions/:id
pub async fn delete_subscription(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    if let Err(e) = state.store.remove_subscription(&id) {
        return store_error(e);
    }

    notify_changed(&state);
    Json(state.store.subscriptions()).into_response()
}

// DELETE /api/subscriptions
pub async fn delete_all_subscriptions(State(state): State<AppState>) -> Response {
    if let Err(e) = state.store.clear_all_subscriptions() {
        return store_error(e);
    }

    notify_changed(&state);
    StatusCode::NO_CONTENT.into_response()
}

// GET /api/subscriptions/export
pub async fn get_export(State(state): State<AppState>) -> Response {
    match state.store.export() {
        Ok(doc) => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"crypto-subscriptions.json\"",
                ),
            ],
            doc,
        )
            .into_response(),
        Err(e) => store_error(e),
    }
}

// POST /api/subscriptions/import  (body: exported document)
pub async fn post_import(State(state): State<AppState>, body: String) -> Response {
    if !state.store.import(&body) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid subscriptions document" })),
        )
            .into_response();
    }

    notify_changed(&state);
    Json(json!({ "imported": true, "subscriptions": state.store.subscriptions() })).into_response()
}
