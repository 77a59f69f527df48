use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    models::{CryptoAsset, PriceHistory, Trending},
};

const MARKET_PARAMS: [(&str, &str); 5] = [
    ("order", "market_cap_desc"),
    ("page", "1"),
    ("sparkline", "true"),
    ("price_change_percentage", "1h,24h,7d"),
    ("locale", "en"),
];

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// GET `{base}{path}` and hand back the JSON body untouched.
    pub async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<serde_json::Value, ApiError> {
        self.get_json(path, params).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} {:?}", url, params);

        let res = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ApiError::Upstream(res.status()));
        }

        Ok(res.json::<T>().await?)
    }

    pub fn markets_params(ids: &[String], vs_currency: &str, per_page: usize) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&str, String)> = vec![
            ("vs_currency", vs_currency.to_string()),
            ("per_page", per_page.to_string()),
        ];
        params.extend(MARKET_PARAMS.iter().map(|(k, v)| (*k, v.to_string())));
        if !ids.is_empty() {
            params.push(("ids", ids.join(",")));
        }
        params
    }

    /// `days` goes upstream as given (CoinGecko also takes `max`). Only a
    /// leading integer of at most 1 switches to hourly points.
    pub fn chart_params(days: &str, vs_currency: &str) -> Vec<(&'static str, String)> {
        let interval = match leading_int(days) {
            Some(d) if d <= 1 => "hourly",
            _ => "daily",
        };
        vec![
            ("vs_currency", vs_currency.to_string()),
            ("days", days.to_string()),
            ("interval", interval.to_string()),
        ]
    }

    pub async fn markets(&self, ids: &[String], vs_currency: &str) -> Result<Vec<CryptoAsset>, ApiError> {
        self.get_json("/coins/markets", &Self::markets_params(ids, vs_currency, 250))
            .await
    }

    pub async fn trending(&self) -> Result<Trending, ApiError> {
        self.get_json("/search/trending", &[]).await
    }

    pub async fn price_history(&self, id: &str, days: &str, vs_currency: &str) -> Result<PriceHistory, ApiError> {
        let path = format!("/coins/{id}/market_chart");
        self.get_json(&path, &Self::chart_params(days, vs_currency)).await
    }

    pub async fn search(&self, query: &str) -> Result<serde_json::Value, ApiError> {
        self.get_json("/search", &[("query", query.to_string())]).await
    }

    pub async fn global(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json("/global", &[]).await
    }
}

fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let digits_from = usize::from(raw.starts_with(['-', '+']));
    let end = raw[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw.len(), |i| i + digits_from);
    raw[..end].parse().ok()
}
