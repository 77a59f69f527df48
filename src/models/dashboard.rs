use serde::Serialize;

use crate::models::{CryptoAsset, Trending};

/// What the dashboard shows: the latest refresh result.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub assets: Vec<CryptoAsset>,
    pub trending: Option<Trending>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<String>,
}
