use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use tokio::{task::JoinHandle, time};

use crate::{events::ServerEvent, AppState};

const VS_CURRENCY: &str = "usd";

/// Re-fetches market data every `refresh_interval_secs` and runs the price
/// alert check on each result. Abort the handle to stop it.
pub fn spawn_market_monitor(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(state.settings.refresh_interval_secs));

        loop {
            interval.tick().await;

            if let Err(e) = refresh(&state).await {
                tracing::warn!("[market-monitor] refresh failed: {}", e);
            }
        }
    })
}

/// One fetch-then-evaluate cycle. Returns the number of assets fetched.
pub async fn refresh(state: &AppState) -> Result<usize, String> {
    state.dashboard.write().await.loading = true;

    let subscribed = state.store.subscribed_ids();
    let ids = if subscribed.is_empty() {
        state.settings.default_coins.clone()
    } else {
        subscribed
    };

    let (markets, trending) = tokio::join!(
        state.coingecko.markets(&ids, VS_CURRENCY),
        state.coingecko.trending(),
    );

    // trending is decoration; its failure must not hide the prices
    let trending = match trending {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::debug!("[market-monitor] trending unavailable: {}", e);
            None
        }
    };

    let assets = match markets {
        Ok(a) => a,
        Err(e) => {
            let msg = e.to_string();
            let mut snap = state.dashboard.write().await;
            snap.loading = false;
            snap.error = Some(msg.clone());
            return Err(msg);
        }
    };

    {
        let mut snap = state.dashboard.write().await;
        snap.assets = assets.clone();
        snap.trending = trending;
        snap.loading = false;
        snap.error = None;
        snap.last_updated = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    let _ = state.events_tx.send(ServerEvent::signal("marketUpdated"));

    let fired = state
        .evaluator
        .check_price_alerts(&assets, &state.store, &state.notifier)
        .await;
    if fired > 0 {
        tracing::info!("[market-monitor] {} price alert(s) sent", fired);
    }

    Ok(assets.len())
}
