use serde::{Deserialize, Serialize};

/// One row of CoinGecko's `/coins/markets`.
///
/// The upstream nulls most numeric fields for thinly traded coins, so only
/// the identity fields and the current price are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoAsset {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub fully_diluted_valuation: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub ath: Option<f64>,
    #[serde(default)]
    pub ath_change_percentage: Option<f64>,
    #[serde(default)]
    pub ath_date: Option<String>,
    #[serde(default)]
    pub atl: Option<f64>,
    #[serde(default)]
    pub atl_change_percentage: Option<f64>,
    #[serde(default)]
    pub atl_date: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparkline_in_7d: Option<Sparkline>,
}

impl CryptoAsset {
    /// Reported 24h change in percent; missing counts as flat.
    pub fn change_24h(&self) -> f64 {
        self.price_change_percentage_24h.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

/// `/coins/{id}/market_chart`: `[timestamp_ms, value]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
    #[serde(default)]
    pub market_caps: Vec<(f64, f64)>,
    #[serde(default)]
    pub total_volumes: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trending {
    #[serde(default)]
    pub coins: Vec<TrendingCoin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub item: TrendingItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingItem {
    pub id: String,
    #[serde(default)]
    pub coin_id: Option<u64>,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub price_btc: Option<f64>,
    #[serde(default)]
    pub score: Option<u32>,
}
