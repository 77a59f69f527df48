use std::sync::Arc;

use coindash::models::{NewSubscription, NotificationSettings, SettingsUpdate, SubscriptionUpdate};
use coindash::services::{
    storage::{FileStore, KeyValueStore, MemoryStore},
    subscription_store::{SubscriptionStore, SETTINGS_KEY, SUBSCRIPTIONS_KEY},
};

fn store() -> (SubscriptionStore, Arc<MemoryStore>) {
    let kv = Arc::new(MemoryStore::new());
    (SubscriptionStore::new(kv.clone()), kv)
}

fn coin(id: &str, symbol: &str, name: &str) -> NewSubscription {
    NewSubscription {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: format!("https://example.com/{id}.png"),
    }
}

#[test]
fn empty_store_has_no_subscriptions_and_default_settings() {
    let (s, _) = store();
    assert!(s.subscriptions().is_empty());
    assert_eq!(s.notification_settings(), NotificationSettings::default());

    let d = NotificationSettings::default();
    assert!(!d.enabled);
    assert_eq!(d.price_change_threshold, 5.0);
    assert_eq!(d.volume_threshold, 50.0);
    assert!(d.trending_alerts && d.news_alerts);
}

#[test]
fn adding_same_id_twice_keeps_one_record() {
    let (s, _) = store();

    assert!(s.add_subscription(coin("bitcoin", "btc", "Bitcoin")).unwrap());
    assert!(!s.add_subscription(coin("bitcoin", "BTC", "Bitcoin again")).unwrap());

    let subs = s.subscriptions();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].name, "Bitcoin");
    assert_eq!(subs[0].price_threshold, Some(5.0));
    assert_eq!(subs[0].notify_on_trends, Some(true));
    assert!(s.is_subscribed("bitcoin"));
}

#[test]
fn removing_missing_id_leaves_store_unchanged() {
    let (s, kv) = store();
    s.add_subscription(coin("bitcoin", "btc", "Bitcoin")).unwrap();
    let before = kv.get(SUBSCRIPTIONS_KEY);

    s.remove_subscription("dogecoin").unwrap();

    assert_eq!(kv.get(SUBSCRIPTIONS_KEY), before);
    assert_eq!(s.subscribed_ids(), vec!["bitcoin".to_string()]);
}

#[test]
fn remove_drops_only_that_id() {
    let (s, _) = store();
    s.add_subscription(coin("bitcoin", "btc", "Bitcoin")).unwrap();
    s.add_subscription(coin("ethereum", "eth", "Ethereum")).unwrap();

    s.remove_subscription("bitcoin").unwrap();

    assert_eq!(s.subscribed_ids(), vec!["ethereum".to_string()]);
}

#[test]
fn corrupt_records_read_as_empty_and_default() {
    let (s, kv) = store();
    kv.set(SUBSCRIPTIONS_KEY, "{not json".to_string()).unwrap();
    kv.set(SETTINGS_KEY, "[1,2,3]".to_string()).unwrap();

    assert!(s.subscriptions().is_empty());
    assert_eq!(s.notification_settings(), NotificationSettings::default());
}

#[test]
fn partial_settings_merge_with_defaults() {
    let (s, kv) = store();
    kv.set(SETTINGS_KEY, r#"{"enabled":true,"priceChangeThreshold":2.5}"#.to_string())
        .unwrap();

    let settings = s.notification_settings();
    assert!(settings.enabled);
    assert_eq!(settings.price_change_threshold, 2.5);
    assert_eq!(settings.volume_threshold, 50.0);
    assert!(settings.trending_alerts);
}

#[test]
fn update_settings_merges_over_current() {
    let (s, _) = store();
    s.update_notification_settings(SettingsUpdate {
        price_change_threshold: Some(7.0),
        ..Default::default()
    })
    .unwrap();
    let updated = s
        .update_notification_settings(SettingsUpdate {
            news_alerts: Some(false),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(updated.price_change_threshold, 7.0);
    assert!(!updated.news_alerts);
    assert_eq!(s.notification_settings(), updated);
}

#[test]
fn update_subscription_patches_existing_only() {
    let (s, _) = store();
    s.add_subscription(coin("solana", "sol", "Solana")).unwrap();

    let updated = s
        .update_subscription(
            "solana",
            SubscriptionUpdate {
                price_threshold: Some(12.0),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.price_threshold, Some(12.0));
    assert_eq!(updated.symbol, "sol");

    assert!(s
        .update_subscription("cardano", SubscriptionUpdate::default())
        .unwrap()
        .is_none());
}

#[test]
fn clear_removes_all_subscriptions() {
    let (s, kv) = store();
    s.add_subscription(coin("bitcoin", "btc", "Bitcoin")).unwrap();

    s.clear_all_subscriptions().unwrap();

    assert!(kv.get(SUBSCRIPTIONS_KEY).is_none());
    assert!(s.subscriptions().is_empty());
}

#[test]
fn export_then_import_round_trips_subscriptions() {
    let (a, _) = store();
    a.add_subscription(coin("bitcoin", "btc", "Bitcoin")).unwrap();
    a.add_subscription(coin("ethereum", "eth", "Ethereum")).unwrap();
    a.update_notification_settings(SettingsUpdate {
        enabled: Some(true),
        ..Default::default()
    })
    .unwrap();

    let doc = a.export().unwrap();

    let (b, _) = store();
    assert!(b.import(&doc));
    assert_eq!(b.subscriptions(), a.subscriptions());
    assert_eq!(b.notification_settings(), a.notification_settings());
}

#[test]
fn import_rejects_documents_without_subscription_array() {
    let (s, _) = store();
    s.add_subscription(coin("bitcoin", "btc", "Bitcoin")).unwrap();

    assert!(!s.import("not json"));
    assert!(!s.import(r#"{"settings":{"enabled":true}}"#));
    assert!(!s.import(r#"{"subscriptions":{"id":"x"}}"#));

    assert_eq!(s.subscribed_ids(), vec!["bitcoin".to_string()]);
    assert!(!s.notification_settings().enabled);
}

#[test]
fn import_without_settings_keeps_current_settings() {
    let (s, _) = store();
    s.update_notification_settings(SettingsUpdate {
        price_change_threshold: Some(9.0),
        ..Default::default()
    })
    .unwrap();

    assert!(s.import(r#"{"subscriptions":[]}"#));
    assert!(s.subscriptions().is_empty());
    assert_eq!(s.notification_settings().price_change_threshold, 9.0);
}

#[test]
fn file_store_persists_across_reopen() {
    let path = std::env::temp_dir().join(format!("coindash-store-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let s = SubscriptionStore::new(Arc::new(FileStore::open(&path)));
        s.add_subscription(coin("litecoin", "ltc", "Litecoin")).unwrap();
    }

    let reopened = SubscriptionStore::new(Arc::new(FileStore::open(&path)));
    assert_eq!(reopened.subscribed_ids(), vec!["litecoin".to_string()]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn failed_file_write_is_not_visible_to_readers() {
    // a directory where the file should be makes every write fail
    let path = std::env::temp_dir().join(format!("coindash-store-dir-{}", std::process::id()));
    std::fs::create_dir_all(&path).unwrap();

    let kv = FileStore::open(&path);
    assert!(kv.set(SUBSCRIPTIONS_KEY, "[]".to_string()).is_err());
    assert_eq!(kv.get(SUBSCRIPTIONS_KEY), None);

    let _ = std::fs::remove_dir_all(&path);
}

/// Memory store that refuses to write the settings record.
struct SettingsWriteFails(MemoryStore);

impl KeyValueStore for SettingsWriteFails {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), String> {
        if key == SETTINGS_KEY {
            return Err("disk full".to_string());
        }
        self.0.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.0.remove(key)
    }
}

#[test]
fn import_failing_on_settings_keeps_old_subscriptions() {
    let s = SubscriptionStore::new(Arc::new(SettingsWriteFails(MemoryStore::new())));
    s.add_subscription(coin("bitcoin", "btc", "Bitcoin")).unwrap();

    let doc = serde_json::json!({
        "subscriptions": [{
            "id": "dogecoin",
            "symbol": "doge",
            "name": "Dogecoin",
            "image": "",
            "addedAt": "2024-01-01T00:00:00.000Z"
        }],
        "settings": { "enabled": true }
    });

    assert!(!s.import(&doc.to_string()));
    assert_eq!(s.subscribed_ids(), vec!["bitcoin".to_string()]);
}

#[test]
fn import_failing_on_settings_into_empty_store_leaves_it_empty() {
    let kv = Arc::new(SettingsWriteFails(MemoryStore::new()));
    let s = SubscriptionStore::new(kv.clone());

    let doc = r#"{"subscriptions": [], "settings": {"enabled": true}}"#;

    assert!(!s.import(doc));
    assert_eq!(kv.get(SUBSCRIPTIONS_KEY), None);
}
