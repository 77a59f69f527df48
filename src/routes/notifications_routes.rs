use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::notifications_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/notifications/settings",
            get(notifications_controller::get_settings).patch(notifications_controller::patch_settings),
        )
        .route("/api/notifications/status", get(notifications_controller::get_status))
        .route("/api/notifications/permission", post(notifications_controller::post_request_permission))
        .route("/api/notifications/test", post(notifications_controller::post_test_notification))
}
