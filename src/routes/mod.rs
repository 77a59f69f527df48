use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{AppState, controllers::home_controller};

pub mod home_routes;
pub mod crypto_routes;
pub mod news_routes;
pub mod subscriptions_routes;
pub mod notifications_routes;
pub mod dashboard_routes;
pub mod realtime_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = crypto_routes::add_routes(router);
    let router = news_routes::add_routes(router);
    let router = subscriptions_routes::add_routes(router);
    let router = notifications_routes::add_routes(router);
    let router = dashboard_routes::add_routes(router);
    let router = realtime_routes::add_routes(router);

    router
        .fallback(home_controller::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
