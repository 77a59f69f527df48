use serde::{Deserialize, Serialize};

/// Notification preferences for the local profile.
///
/// Every field has a serde default so a partial or older record still loads;
/// missing fields take the values from `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub price_change_threshold: f64,
    // declared but not evaluated anywhere yet
    pub volume_threshold: f64,
    pub trending_alerts: bool,
    pub news_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            price_change_threshold: 5.0,
            volume_threshold: 50.0,
            trending_alerts: true,
            news_alerts: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub enabled: Option<bool>,
    pub price_change_threshold: Option<f64>,
    pub volume_threshold: Option<f64>,
    pub trending_alerts: Option<bool>,
    pub news_alerts: Option<bool>,
}

impl NotificationSettings {
    pub fn merged(mut self, update: SettingsUpdate) -> Self {
        if let Some(v) = update.enabled {
            self.enabled = v;
        }
        if let Some(v) = update.price_change_threshold {
            self.price_change_threshold = v;
        }
        if let Some(v) = update.volume_threshold {
            self.volume_threshold = v;
        }
        if let Some(v) = update.trending_alerts {
            self.trending_alerts = v;
        }
        if let Some(v) = update.news_alerts {
            self.news_alerts = v;
        }
        self
    }
}
