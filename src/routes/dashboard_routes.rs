use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::dashboard_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/dashboard", get(dashboard_controller::get_dashboard))
        .route("/api/dashboard/refresh", post(dashboard_controller::post_refresh))
}
