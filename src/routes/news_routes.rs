use axum::{Router, routing::get};
use crate::{AppState, controllers::news_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/news", get(news_controller::get_news))
        .route("/api/news/trending", get(news_controller::get_trending_news))
        .route("/api/news/categories", get(news_controller::get_categories))
}
