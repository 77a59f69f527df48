pub mod home_controller;
pub mod crypto_controller;
pub mod news_controller;
pub mod subscriptions_controller;
pub mod notifications_controller;
pub mod dashboard_controller;
