use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CoinGecko API error: {0}")]
    Upstream(reqwest::StatusCode),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            other => {
                tracing::error!("crypto API error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to fetch crypto data",
                        "message": other.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
