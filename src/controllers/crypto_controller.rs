use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::{
    config::split_ids,
    error::ApiError,
    services::coingecko::CoinGeckoClient,
    AppState,
};

const DEFAULT_DAYS: &str = "7";

#[derive(Debug, Default, Deserialize)]
pub struct CryptoQuery {
    pub endpoint: Option<String>,
    pub ids: Option<String>,
    pub vs_currency: Option<String>,
    pub days: Option<String>,
    pub q: Option<String>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// GET /api/crypto?endpoint=markets|trending|chart|search|global
pub async fn get_crypto(State(state): State<AppState>, Query(query): Query<CryptoQuery>) -> Response {
    let endpoint = non_empty(&query.endpoint).unwrap_or("markets").to_string();

    match proxy(&state, &endpoint, &query).await {
        Ok(data) => {
            let cache = if endpoint == "chart" { "s-maxage=300" } else { "s-maxage=60" };
            ([(header::CACHE_CONTROL, cache)], Json(data)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn proxy(state: &AppState, endpoint: &str, query: &CryptoQuery) -> Result<serde_json::Value, ApiError> {
    let vs_currency = non_empty(&query.vs_currency).unwrap_or("usd");
    let client = &state.coingecko;

    match endpoint {
        "markets" => {
            let ids = non_empty(&query.ids).map(split_ids).unwrap_or_default();
            client
                .fetch("/coins/markets", &CoinGeckoClient::markets_params(&ids, vs_currency, 250))
                .await
        }
        "trending" => client.fetch("/search/trending", &[]).await,
        "chart" => {
            let Some(id) = non_empty(&query.ids) else {
                return Err(ApiError::BadRequest("Coin ID is required for chart data".to_string()));
            };
            let days = non_empty(&query.days).unwrap_or(DEFAULT_DAYS);

            client
                .fetch(
                    &format!("/coins/{id}/market_chart"),
                    &CoinGeckoClient::chart_params(days, vs_currency),
                )
                .await
        }
        "search" => {
            let Some(q) = non_empty(&query.q) else {
                return Err(ApiError::BadRequest("Query parameter is required for search".to_string()));
            };
            client.search(q).await
        }
        "global" => client.global().await,
        _ => Err(ApiError::BadRequest("Invalid endpoint".to_string())),
    }
}
