use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,

    // percent; overrides the global threshold when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_on_trends: Option<bool>,

    // RFC 3339
    pub added_at: String,
}

/// The asset fields a user picks when subscribing.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubscription {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub price_threshold: Option<f64>,
    pub notify_on_trends: Option<bool>,
}

impl Subscription {
    pub fn apply(&mut self, update: SubscriptionUpdate) {
        if let Some(symbol) = update.symbol {
            self.symbol = symbol;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(t) = update.price_threshold {
            self.price_threshold = Some(t);
        }
        if let Some(n) = update.notify_on_trends {
            self.notify_on_trends = Some(n);
        }
    }
}
