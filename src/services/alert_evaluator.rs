use std::{collections::HashMap, time::Duration};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    models::CryptoAsset,
    services::{notifier::NotificationGateway, subscription_store::SubscriptionStore},
};

pub const COOLDOWN: Duration = Duration::from_secs(5 * 60);

/// Last observation of an asset. Lives only as long as the process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMemoryEntry {
    pub price: f64,
    // unix millis
    pub timestamp: i64,
    // true while |change| has stayed at/over threshold since the last alert
    pub notification_sent: bool,
}

/// Decides which subscribed assets deserve a price alert on each refresh.
///
/// The decision uses the 24h change the market data reports for the asset.
/// The stored price is kept per asset but does not take part in it.
pub struct AlertEvaluator {
    memory: Mutex<HashMap<String, PriceMemoryEntry>>,
    cooldown_ms: i64,
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertEvaluator {
    pub fn new() -> Self {
        Self::with_cooldown(COOLDOWN)
    }

    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            memory: Mutex::new(HashMap::new()),
            cooldown_ms: cooldown.as_millis() as i64,
        }
    }

    pub async fn memory_entry(&self, asset_id: &str) -> Option<PriceMemoryEntry> {
        self.memory.lock().await.get(asset_id).copied()
    }

    pub async fn check_price_alerts(
        &self,
        assets: &[CryptoAsset],
        store: &SubscriptionStore,
        gateway: &NotificationGateway,
    ) -> usize {
        self.check_price_alerts_at(assets, store, gateway, Utc::now().timestamp_millis())
            .await
    }

    /// Runs one evaluation cycle as of `now_ms` and returns how many alerts
    /// were sent.
    pub async fn check_price_alerts_at(
        &self,
        assets: &[CryptoAsset],
        store: &SubscriptionStore,
        gateway: &NotificationGateway,
        now_ms: i64,
    ) -> usize {
        let settings = store.notification_settings();
        if !settings.enabled || !gateway.permission().is_granted() {
            return 0;
        }

        let subscriptions = store.subscriptions();
        let mut memory = self.memory.lock().await;
        let mut fired = 0;

        for asset in assets {
            let Some(sub) = subscriptions.iter().find(|s| s.id == asset.id) else {
                continue;
            };

            let change = asset.change_24h();
            let mut notification_sent = false;

            // the first sighting only sets a baseline
            if let Some(prev) = memory.get(&asset.id).copied() {
                let elapsed = now_ms - prev.timestamp;
                // a zero (or NaN) override means "use the global threshold"
                let threshold = sub
                    .price_threshold
                    .filter(|t| *t != 0.0 && !t.is_nan())
                    .unwrap_or(settings.price_change_threshold);

                if change.abs() >= threshold {
                    if !prev.notification_sent || elapsed > self.cooldown_ms {
                        let shown = gateway
                            .send_price_alert(
                                &asset.name,
                                &asset.symbol,
                                asset.current_price,
                                change,
                                Some(asset.image.as_str()).filter(|s| !s.is_empty()),
                            )
                            .await;

                        tracing::info!(
                            "price alert {} {:+.2}% (threshold {}%) shown={}",
                            asset.id,
                            change,
                            threshold,
                            shown
                        );

                        fired += 1;
                    }
                    notification_sent = true;
                }
            }

            memory.insert(
                asset.id.clone(),
                PriceMemoryEntry {
                    price: asset.current_price,
                    timestamp: now_ms,
                    notification_sent,
                },
            );
        }

        fired
    }
}
