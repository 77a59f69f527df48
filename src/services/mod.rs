pub mod storage;
pub mod subscription_store;
pub mod notifier;
pub mod alert_evaluator;

pub mod coingecko;
pub mod news_service;
pub mod market_monitor;
