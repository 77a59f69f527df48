use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{NewSubscription, NotificationSettings, SettingsUpdate, Subscription, SubscriptionUpdate},
    services::storage::KeyValueStore,
};

pub const SUBSCRIPTIONS_KEY: &str = "crypto_subscriptions";
pub const SETTINGS_KEY: &str = "crypto_notification_settings";

const NEW_SUBSCRIPTION_THRESHOLD: f64 = 5.0;

/// Export/import document.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub subscriptions: Vec<Subscription>,
    pub settings: NotificationSettings,
}

/// Subscriptions and notification settings for the local profile.
#[derive(Clone)]
pub struct SubscriptionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SubscriptionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        let Some(raw) = self.kv.get(SUBSCRIPTIONS_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable subscriptions record: {}", e);
            Vec::new()
        })
    }

    fn save_subscriptions(&self, subs: &[Subscription]) -> Result<(), String> {
        let raw = serde_json::to_string(subs).map_err(|e| e.to_string())?;
        self.kv.set(SUBSCRIPTIONS_KEY, raw)
    }

    /// Returns false when the id was already subscribed.
    pub fn add_subscription(&self, asset: NewSubscription) -> Result<bool, String> {
        let mut subs = self.subscriptions();
        if subs.iter().any(|s| s.id == asset.id) {
            return Ok(false);
        }

        subs.push(Subscription {
            id: asset.id,
            symbol: asset.symbol,
            name: asset.name,
            image: asset.image,
            price_threshold: Some(NEW_SUBSCRIPTION_THRESHOLD),
            notify_on_trends: Some(true),
            added_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });

        self.save_subscriptions(&subs)?;
        Ok(true)
    }

    pub fn remove_subscription(&self, id: &str) -> Result<(), String> {
        let subs = self.subscriptions();
        if !subs.iter().any(|s| s.id == id) {
            return Ok(());
        }

        let kept: Vec<Subscription> = subs.into_iter().filter(|s| s.id != id).collect();
        self.save_subscriptions(&kept)
    }

    pub fn is_subscribed(&self, id: &str) -> bool {
        self.subscriptions().iter().any(|s| s.id == id)
    }

    pub fn subscription(&self, id: &str) -> Option<Subscription> {
        self.subscriptions().into_iter().find(|s| s.id == id)
    }

    /// Merges `update` into an existing subscription. Returns the updated
    /// record, or None if the id is not subscribed.
    pub fn update_subscription(
        &self,
        id: &str,
        update: SubscriptionUpdate,
    ) -> Result<Option<Subscription>, String> {
        let mut subs = self.subscriptions();
        let Some(sub) = subs.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        sub.apply(update);
        let updated = sub.clone();

        self.save_subscriptions(&subs)?;
        Ok(Some(updated))
    }

    pub fn subscribed_ids(&self) -> Vec<String> {
        self.subscriptions().into_iter().map(|s| s.id).collect()
    }

    pub fn clear_all_subscriptions(&self) -> Result<(), String> {
        self.kv.remove(SUBSCRIPTIONS_KEY)
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        let Some(raw) = self.kv.get(SETTINGS_KEY) else {
            return NotificationSettings::default();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("ignoring unreadable notification settings: {}", e);
            NotificationSettings::default()
        })
    }

    pub fn update_notification_settings(
        &self,
        update: SettingsUpdate,
    ) -> Result<NotificationSettings, String> {
        let updated = self.notification_settings().merged(update);
        let raw = serde_json::to_string(&updated).map_err(|e| e.to_string())?;
        self.kv.set(SETTINGS_KEY, raw)?;
        Ok(updated)
    }

    pub fn export(&self) -> Result<String, String> {
        let envelope = ExportEnvelope {
            subscriptions: self.subscriptions(),
            settings: self.notification_settings(),
        };
        serde_json::to_string_pretty(&envelope).map_err(|e| e.to_string())
    }

    /// Replaces the stored state with an exported document.
    ///
    /// Only checks that `subscriptions` is an array; `settings` is written
    /// when present. Returns false and leaves the stored state as it was
    /// when the document is invalid or a write fails.
    pub fn import(&self, data: &str) -> bool {
        let parsed: serde_json::Value = match serde_json::from_str(data) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("import rejected, not JSON: {}", e);
                return false;
            }
        };

        let Some(subs) = parsed.get("subscriptions").filter(|v| v.is_array()) else {
            return false;
        };

        let previous = self.kv.get(SUBSCRIPTIONS_KEY);

        if let Err(e) = self.kv.set(SUBSCRIPTIONS_KEY, subs.to_string()) {
            tracing::error!("import failed writing subscriptions: {}", e);
            return false;
        }

        if let Some(settings) = parsed.get("settings").filter(|v| !v.is_null()) {
            if let Err(e) = self.kv.set(SETTINGS_KEY, settings.to_string()) {
                tracing::error!("import failed writing settings: {}", e);

                // put the old subscriptions back so a failed import changes nothing
                let restored = match previous {
                    Some(raw) => self.kv.set(SUBSCRIPTIONS_KEY, raw),
                    None => self.kv.remove(SUBSCRIPTIONS_KEY),
                };
                if let Err(e) = restored {
                    tracing::error!("import could not restore subscriptions: {}", e);
                }
                return false;
            }
        }

        true
    }
}
