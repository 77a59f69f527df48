use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{config::split_ids, services::news_service::NewsQuery, AppState};

const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub category: Option<String>,
    pub coins: Option<String>,
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl NewsParams {
    fn into_query(self) -> NewsQuery {
        NewsQuery {
            category: self.category,
            coins: self.coins.as_deref().map(split_ids).unwrap_or_default(),
            q: self.q,
            page: self
                .page
                .and_then(|p| p.trim().parse::<usize>().ok())
                .unwrap_or(1),
            limit: self
                .limit
                .and_then(|l| l.trim().parse::<usize>().ok())
                .unwrap_or(DEFAULT_LIMIT),
        }
    }
}

// GET /api/news
pub async fn get_news(State(state): State<AppState>, Query(params): Query<NewsParams>) -> impl IntoResponse {
    let query = params.into_query();
    Json(state.news.query(&query).await)
}

// GET /api/news/trending
pub async fn get_trending_news(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.news.trending().await)
}

// GET /api/news/categories
pub async fn get_categories(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.news.categories())
}
