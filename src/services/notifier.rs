use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use tokio::sync::{broadcast, Mutex};

use crate::{
    events::ServerEvent,
    models::{Notification, Permission},
    services::storage::KeyValueStore,
};

pub const PERMISSION_KEY: &str = "crypto_notification_permission";

/// Platform side of notifications: whatever actually shows them to the user.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Permission state known before anything was asked.
    fn initial_permission(&self) -> Permission;

    /// Ask the user. Called at most once per gateway while undecided.
    async fn prompt_permission(&self) -> Permission;

    async fn display(&self, notification: &Notification) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationStatus {
    pub supported: bool,
    pub permission: Permission,
    pub enabled: bool,
}

/// Permission-gated front door for every notification the app sends.
/// Never returns an error: failures come back as `false` / `Denied`.
#[derive(Clone)]
pub struct NotificationGateway {
    backend: Arc<dyn NotificationBackend>,
    permission: Arc<RwLock<Permission>>,
    prompt_lock: Arc<Mutex<()>>,
}

impl NotificationGateway {
    pub fn new(backend: Arc<dyn NotificationBackend>) -> Self {
        let permission = if backend.is_supported() {
            backend.initial_permission()
        } else {
            Permission::Denied
        };

        Self {
            backend,
            permission: Arc::new(RwLock::new(permission)),
            prompt_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.backend.is_supported()
    }

    pub fn permission(&self) -> Permission {
        *self.permission.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_permission(&self, answer: Permission) {
        *self.permission.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = answer;
    }

    pub async fn request_permission(&self) -> Permission {
        if !self.is_supported() {
            return Permission::Denied;
        }

        let current = self.permission();
        if current != Permission::Default {
            return current;
        }

        let _guard = self.prompt_lock.lock().await;

        // another caller may have prompted while we waited
        let current = self.permission();
        if current != Permission::Default {
            return current;
        }

        let answer = self.backend.prompt_permission().await;
        tracing::info!("notification permission answered: {:?}", answer);
        self.set_permission(answer);
        answer
    }

    pub fn are_enabled(&self) -> bool {
        self.is_supported() && self.permission().is_granted()
    }

    pub fn status(&self) -> NotificationStatus {
        NotificationStatus {
            supported: self.is_supported(),
            permission: self.permission(),
            enabled: self.are_enabled(),
        }
    }

    pub async fn send(&self, notification: Notification) -> bool {
        if !self.is_supported() {
            tracing::warn!("notifications not supported");
            return false;
        }

        if !self.permission().is_granted() && !self.request_permission().await.is_granted() {
            tracing::warn!("notification permission denied");
            return false;
        }

        match self.backend.display(&notification).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("error sending notification: {}", e);
                false
            }
        }
    }

    pub async fn send_price_alert(
        &self,
        name: &str,
        symbol: &str,
        price: f64,
        change: f64,
        image: Option<&str>,
    ) -> bool {
        self.send(price_alert(name, symbol, price, change, image)).await
    }

    pub async fn send_trending_alert(
        &self,
        name: &str,
        symbol: &str,
        rank: Option<u32>,
        image: Option<&str>,
    ) -> bool {
        self.send(trending_alert(name, symbol, rank, image)).await
    }

    pub async fn send_news_alert(&self, title: &str, url: Option<&str>, source: Option<&str>) -> bool {
        self.send(news_alert(title, url, source)).await
    }

    pub async fn send_volume_alert(
        &self,
        name: &str,
        symbol: &str,
        volume_increase: f64,
        image: Option<&str>,
    ) -> bool {
        self.send(volume_alert(name, symbol, volume_increase, image)).await
    }

    pub async fn send_test_notification(&self) -> bool {
        let mut n = Notification::new("🔔 Test Notification", "Crypto notifications are working correctly!");
        n.tag = Some("test-notification".to_string());
        self.send(n).await
    }
}

pub fn price_alert(name: &str, symbol: &str, price: f64, change: f64, image: Option<&str>) -> Notification {
    let emoji = if change >= 0.0 { "🚀" } else { "📉" };

    let mut n = Notification::new(
        format!("{emoji} {name} Price Alert"),
        format!("{} is now ${:.4} ({:+.2}%)", symbol.to_uppercase(), price, change),
    );
    n.icon = image.map(str::to_string);
    n.tag = Some(format!("price-{symbol}"));
    n.data = Some(json!({
        "type": "price_alert",
        "symbol": symbol,
        "price": price,
        "change": change,
    }));
    n
}

pub fn trending_alert(name: &str, symbol: &str, rank: Option<u32>, image: Option<&str>) -> Notification {
    let rank_text = rank.map(|r| format!(" (#{r})")).unwrap_or_default();

    let mut n = Notification::new(
        format!("📈 {name} is Trending!"),
        format!("{} is currently trending{}", symbol.to_uppercase(), rank_text),
    );
    n.icon = image.map(str::to_string);
    n.tag = Some(format!("trending-{symbol}"));
    n.require_interaction = true;
    n.data = Some(json!({
        "type": "trending_alert",
        "symbol": symbol,
        "rank": rank,
    }));
    n
}

pub fn news_alert(title: &str, url: Option<&str>, source: Option<&str>) -> Notification {
    let mut n = Notification::new("📰 Crypto News Alert", title);
    n.tag = Some("crypto-news".to_string());
    n.require_interaction = true;
    n.data = Some(json!({
        "type": "news_alert",
        "url": url,
        "source": source,
    }));
    n
}

pub fn volume_alert(name: &str, symbol: &str, volume_increase: f64, image: Option<&str>) -> Notification {
    let mut n = Notification::new(
        "📊 Volume Spike Alert",
        format!(
            "{} ({}) volume increased by {:.1}%",
            name,
            symbol.to_uppercase(),
            volume_increase
        ),
    );
    n.icon = image.map(str::to_string);
    n.tag = Some(format!("volume-{symbol}"));
    n.data = Some(json!({
        "type": "volume_alert",
        "symbol": symbol,
        "volumeIncrease": volume_increase,
    }));
    n
}

/// Pushes notifications to open dashboard tabs over the event stream; the
/// tab shows them with the browser's own notification API.
///
/// A decided permission is remembered in the profile store, so it survives
/// restarts the way a browser keeps it across reloads.
pub struct BroadcastBackend {
    events_tx: broadcast::Sender<ServerEvent>,
    answer: Permission,
    kv: Arc<dyn KeyValueStore>,
}

impl BroadcastBackend {
    pub fn new(
        events_tx: broadcast::Sender<ServerEvent>,
        answer: Permission,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self { events_tx, answer, kv }
    }
}

#[async_trait]
impl NotificationBackend for BroadcastBackend {
    fn is_supported(&self) -> bool {
        true
    }

    fn initial_permission(&self) -> Permission {
        self.kv
            .get(PERMISSION_KEY)
            .and_then(|raw| Permission::parse(&raw))
            .unwrap_or(Permission::Default)
    }

    async fn prompt_permission(&self) -> Permission {
        if self.answer != Permission::Default {
            if let Err(e) = self.kv.set(PERMISSION_KEY, self.answer.as_str().to_string()) {
                tracing::warn!("could not remember notification permission: {}", e);
            }
        }
        self.answer
    }

    async fn display(&self, notification: &Notification) -> Result<(), String> {
        let payload = json!({
            "title": notification.title,
            "body": notification.body,
            "icon": notification.icon_or_default(),
            "tag": notification.tag,
            "requireInteraction": notification.require_interaction,
            "data": notification.data,
            "autoDismissMs": notification.auto_dismiss_after().map(|d| d.as_millis() as u64),
            "clickUrl": notification.click_url(),
        });

        self.events_tx
            .send(ServerEvent::json("notification", &payload))
            .map(|_| ())
            .map_err(|_| "no dashboard connected".to_string())
    }
}
