use std::env;

use crate::models::Permission;

pub const DEFAULT_COINS: [&str; 10] = [
    "bitcoin",
    "ethereum",
    "binancecoin",
    "cardano",
    "solana",
    "polkadot",
    "chainlink",
    "litecoin",
    "bitcoin-cash",
    "stellar",
];

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub coingecko_base_url: String,
    pub data_file: String,

    pub refresh_interval_secs: u64,
    pub news_latency_ms: u64,

    // answer given when the dashboard asks for notification permission
    pub notification_permission: Permission,

    pub default_coins: Vec<String>,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let coingecko_base_url = env::var("COINGECKO_BASE_URL")
        .unwrap_or_else(|_| "https://api.coingecko.com/api/v3".to_string());

    let data_file = env::var("DATA_FILE").unwrap_or_else(|_| "data/coindash.json".to_string());

    let refresh_interval_secs = env::var("REFRESH_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(30);

    let news_latency_ms = env::var("NEWS_LATENCY_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(300);

    let notification_permission = env::var("NOTIFICATION_PERMISSION")
        .ok()
        .and_then(|s| Permission::parse(&s))
        .unwrap_or(Permission::Granted);

    let default_coins = env::var("DEFAULT_COINS")
        .ok()
        .map(|s| split_ids(&s))
        .filter(|ids| !ids.is_empty())
        .unwrap_or_else(|| DEFAULT_COINS.iter().map(|s| s.to_string()).collect());

    Settings {
        host,
        port,
        coingecko_base_url,
        data_file,
        refresh_interval_secs,
        news_latency_ms,
        notification_permission,
        default_coins,
    }
}

/// Splits a comma separated id list, dropping blanks.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
