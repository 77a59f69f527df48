pub mod asset;
pub mod dashboard;
pub mod news;
pub mod notification;
pub mod settings;
pub mod subscription;

pub use asset::{CryptoAsset, PriceHistory, Sparkline, Trending, TrendingCoin, TrendingItem};
pub use dashboard::DashboardSnapshot;
pub use news::{NewsArticle, NewsResponse, Sentiment};
pub use notification::{Notification, Permission};
pub use settings::{NotificationSettings, SettingsUpdate};
pub use subscription::{NewSubscription, Subscription, SubscriptionUpdate};
