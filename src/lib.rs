//! Library entrypoint for CoinDash.
//!
//! `main.rs` only wires things together; integration tests under `tests/`
//! build an `AppState` with in-memory fakes and drive the routers directly.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

pub mod config;
pub mod error;
pub mod events;
pub mod models;

pub mod services;

pub mod controllers;
pub mod routes;

use services::{
    alert_evaluator::AlertEvaluator,
    coingecko::CoinGeckoClient,
    news_service::NewsService,
    notifier::{NotificationBackend, NotificationGateway},
    storage::KeyValueStore,
    subscription_store::SubscriptionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub coingecko: CoinGeckoClient,
    pub news: NewsService,
    pub store: SubscriptionStore,
    pub notifier: NotificationGateway,
    pub evaluator: Arc<AlertEvaluator>,
    pub dashboard: Arc<RwLock<models::DashboardSnapshot>>,
    pub events_tx: broadcast::Sender<events::ServerEvent>,
}

impl AppState {
    pub fn new(
        settings: config::Settings,
        kv: Arc<dyn KeyValueStore>,
        backend: Arc<dyn NotificationBackend>,
        events_tx: broadcast::Sender<events::ServerEvent>,
    ) -> Self {
        Self {
            coingecko: CoinGeckoClient::new(settings.coingecko_base_url.clone()),
            news: NewsService::new(std::time::Duration::from_millis(settings.news_latency_ms)),
            store: SubscriptionStore::new(kv),
            notifier: NotificationGateway::new(backend),
            evaluator: Arc::new(AlertEvaluator::new()),
            dashboard: Arc::new(RwLock::new(models::DashboardSnapshot {
                loading: true,
                ..Default::default()
            })),
            events_tx,
            settings,
        }
    }
}
