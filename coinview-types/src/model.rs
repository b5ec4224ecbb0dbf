//! Payloads returned by resource fetchers.
//!
//! Field names follow the upstream JSON so the records deserialize directly;
//! unknown fields are ignored. Apart from the few fields the detail view
//! surfaces, everything here is pass-through data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive, rarely-changing record for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Resource identifier, e.g. `btc-bitcoin`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Market-cap rank; `0` for inactive assets.
    pub rank: u32,
    /// Whether the asset was recently listed.
    #[serde(default)]
    pub is_new: bool,
    /// Whether the asset is actively traded.
    #[serde(default)]
    pub is_active: bool,
    /// Classification, e.g. `coin` or `token`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Operator notice attached to the asset.
    #[serde(default)]
    pub message: Option<String>,
    /// Whether the project is open source.
    #[serde(default)]
    pub open_source: bool,
    /// Project start date as published upstream.
    #[serde(default)]
    pub started_at: Option<String>,
    /// Development status label.
    #[serde(default)]
    pub development_status: Option<String>,
    /// Whether a hardware wallet supports the asset.
    #[serde(default)]
    pub hardware_wallet: bool,
    /// Consensus proof type.
    #[serde(default)]
    pub proof_type: Option<String>,
    /// Organisation structure label.
    #[serde(default)]
    pub org_structure: Option<String>,
    /// Hashing algorithm name.
    #[serde(default)]
    pub hash_algorithm: Option<String>,
    /// First data point timestamp as published upstream.
    #[serde(default)]
    pub first_data_at: Option<String>,
    /// Last data point timestamp as published upstream.
    #[serde(default)]
    pub last_data_at: Option<String>,
}

/// Live market record for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetTicker {
    /// Resource identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Market-cap rank.
    #[serde(default)]
    pub rank: u32,
    /// Circulating supply.
    #[serde(default)]
    pub circulating_supply: u64,
    /// Total supply.
    #[serde(default)]
    pub total_supply: u64,
    /// Maximum supply; `0` when uncapped.
    #[serde(default)]
    pub max_supply: u64,
    /// Beta against the overall market.
    #[serde(default)]
    pub beta_value: f64,
    /// First data point.
    #[serde(default)]
    pub first_data_at: Option<DateTime<Utc>>,
    /// Time of the last ticker update.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Quotes in the supported quote currency.
    pub quotes: TickerQuotes,
}

impl AssetTicker {
    /// Current price in the quote currency.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.quotes.usd.price
    }
}

/// Quote block of a ticker. Only USD is requested and modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerQuotes {
    /// USD quote.
    #[serde(rename = "USD")]
    pub usd: TickerQuote,
}

/// Market figures in one quote currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerQuote {
    /// Last price.
    pub price: f64,
    /// Traded volume over 24h.
    pub volume_24h: f64,
    /// Volume change over 24h, in percent.
    pub volume_24h_change_24h: f64,
    /// Market capitalisation.
    pub market_cap: f64,
    /// Market cap change over 24h, in percent.
    pub market_cap_change_24h: f64,
    /// Price change over 15 minutes, in percent.
    pub percent_change_15m: f64,
    /// Price change over 30 minutes, in percent.
    pub percent_change_30m: f64,
    /// Price change over 1 hour, in percent.
    pub percent_change_1h: f64,
    /// Price change over 6 hours, in percent.
    pub percent_change_6h: f64,
    /// Price change over 12 hours, in percent.
    pub percent_change_12h: f64,
    /// Price change over 24 hours, in percent.
    pub percent_change_24h: f64,
    /// Price change over 7 days, in percent.
    pub percent_change_7d: f64,
    /// Price change over 30 days, in percent.
    pub percent_change_30d: f64,
    /// Price change over 1 year, in percent.
    pub percent_change_1y: f64,
    /// All-time-high price.
    pub ath_price: Option<f64>,
    /// Time of the all-time high.
    pub ath_date: Option<DateTime<Utc>>,
    /// Distance from the all-time high, in percent.
    pub percent_from_price_ath: Option<f64>,
}
