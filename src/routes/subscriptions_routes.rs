use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::subscriptions_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/subscriptions",
            get(subscriptions_controller::get_subscriptions)
                .post(subscriptions_controller::post_subscription)
                .delete(subscriptions_controller::delete_all_subscriptions),
        )
        .route("/api/subscriptions/export", get(subscriptions_controller::get_export))
        .route("/api/subscriptions/import", post(subscriptions_controller::post_import))
        .route(
            "/api/subscriptions/:id",
            axum::routing::patch(subscriptions_controller::patch_subscription)
                .delete(subscriptions_controller::delete_subscription),
        )
}
