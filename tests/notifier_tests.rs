use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use async_trait::async_trait;
use coindash::models::{Notification, Permission};
use coindash::services::notifier::{
    news_alert, price_alert, trending_alert, volume_alert, NotificationBackend, NotificationGateway,
};

struct FakeBackend {
    supported: bool,
    initial: Permission,
    answer: Permission,
    prompts: AtomicUsize,
    fail_display: bool,
    shown: Mutex<Vec<Notification>>,
}

impl FakeBackend {
    fn new(supported: bool, initial: Permission, answer: Permission) -> Arc<Self> {
        Arc::new(Self {
            supported,
            initial,
            answer,
            prompts: AtomicUsize::new(0),
            fail_display: false,
            shown: Mutex::new(Vec::new()),
        })
    }

    fn shown(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationBackend for FakeBackend {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn initial_permission(&self) -> Permission {
        self.initial
    }

    async fn prompt_permission(&self) -> Permission {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.answer
    }

    async fn display(&self, notification: &Notification) -> Result<(), String> {
        if self.fail_display {
            return Err("display failed".to_string());
        }
        self.shown.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[tokio::test]
async fn unsupported_platform_denies_without_prompting() {
    let backend = FakeBackend::new(false, Permission::Granted, Permission::Granted);
    let gw = NotificationGateway::new(backend.clone());

    assert!(!gw.is_supported());
    assert_eq!(gw.permission(), Permission::Denied);
    assert_eq!(gw.request_permission().await, Permission::Denied);
    assert!(!gw.send(Notification::new("t", "b")).await);

    assert_eq!(backend.prompts.load(Ordering::SeqCst), 0);
    assert_eq!(backend.shown(), 0);
}

#[tokio::test]
async fn undecided_permission_prompts_once_and_caches() {
    let backend = FakeBackend::new(true, Permission::Default, Permission::Granted);
    let gw = NotificationGateway::new(backend.clone());

    assert_eq!(gw.permission(), Permission::Default);
    assert_eq!(gw.request_permission().await, Permission::Granted);
    assert_eq!(gw.request_permission().await, Permission::Granted);

    assert_eq!(backend.prompts.load(Ordering::SeqCst), 1);
    assert!(gw.status().enabled);
}

#[tokio::test]
async fn decided_permission_is_not_asked_again() {
    let backend = FakeBackend::new(true, Permission::Denied, Permission::Granted);
    let gw = NotificationGateway::new(backend.clone());

    assert_eq!(gw.request_permission().await, Permission::Denied);
    assert!(!gw.send(Notification::new("t", "b")).await);

    assert_eq!(backend.prompts.load(Ordering::SeqCst), 0);
    assert_eq!(backend.shown(), 0);
}

#[tokio::test]
async fn send_asks_for_permission_when_undecided() {
    let backend = FakeBackend::new(true, Permission::Default, Permission::Granted);
    let gw = NotificationGateway::new(backend.clone());

    assert!(gw.send_test_notification().await);
    assert_eq!(backend.prompts.load(Ordering::SeqCst), 1);
    assert_eq!(backend.shown(), 1);
}

#[tokio::test]
async fn send_returns_false_when_user_declines() {
    let backend = FakeBackend::new(true, Permission::Default, Permission::Denied);
    let gw = NotificationGateway::new(backend.clone());

    assert!(!gw.send(Notification::new("t", "b")).await);
    assert_eq!(gw.permission(), Permission::Denied);
    assert_eq!(backend.shown(), 0);
}

#[tokio::test]
async fn display_failure_becomes_false() {
    let backend = Arc::new(FakeBackend {
        supported: true,
        initial: Permission::Granted,
        answer: Permission::Granted,
        prompts: AtomicUsize::new(0),
        fail_display: true,
        shown: Mutex::new(Vec::new()),
    });
    let gw = NotificationGateway::new(backend);

    assert!(!gw.send_price_alert("Bitcoin", "btc", 1.0, 6.0, None).await);
}

#[test]
fn price_alert_formats_negative_change() {
    let n = price_alert("Ethereum", "eth", 3120.5, -6.789, Some("https://example.com/eth.png"));

    assert_eq!(n.title, "📉 Ethereum Price Alert");
    assert_eq!(n.body, "ETH is now $3120.5000 (-6.79%)");
    assert_eq!(n.tag.as_deref(), Some("price-eth"));
    assert_eq!(n.icon_or_default(), "https://example.com/eth.png");
    assert_eq!(n.auto_dismiss_after(), Some(Duration::from_secs(10)));
}

#[test]
fn trending_and_news_alerts_stay_until_dismissed() {
    let t = trending_alert("Solana", "sol", Some(3), None);
    assert_eq!(t.title, "📈 Solana is Trending!");
    assert_eq!(t.body, "SOL is currently trending (#3)");
    assert_eq!(t.icon_or_default(), "/favicon.ico");
    assert!(t.auto_dismiss_after().is_none());

    let n = news_alert("ETF approved", Some("https://example.com/etf"), Some("CoinDesk"));
    assert_eq!(n.title, "📰 Crypto News Alert");
    assert_eq!(n.body, "ETF approved");
    assert_eq!(n.tag.as_deref(), Some("crypto-news"));
    assert_eq!(n.click_url(), Some("https://example.com/etf"));
    assert!(n.auto_dismiss_after().is_none());
}

#[test]
fn volume_alert_body() {
    let v = volume_alert("Cardano", "ada", 72.345, None);
    assert_eq!(v.title, "📊 Volume Spike Alert");
    assert_eq!(v.body, "Cardano (ADA) volume increased by 72.3%");
    assert_eq!(v.tag.as_deref(), Some("volume-ada"));
}
