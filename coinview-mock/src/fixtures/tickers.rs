use chrono::{TimeZone, Utc};
use coinview_core::{AssetTicker, TickerQuote, TickerQuotes};

pub fn by_id(id: &str) -> Option<AssetTicker> {
    match id {
        "btc-bitcoin" => Some(t("btc-bitcoin", "Bitcoin", "BTC", 1, 21_000_000, 21_000_000, 50_000.0)),
        "eth-ethereum" => Some(t("eth-ethereum", "Ethereum", "ETH", 2, 120_000_000, 0, 3_000.0)),
        "bch-bitcoin-cash" => Some(t(
            "bch-bitcoin-cash",
            "Bitcoin Cash",
            "BCH",
            17,
            21_000_000,
            21_000_000,
            450.0,
        )),
        "usdt-tether" => Some(t("usdt-tether", "Tether", "USDT", 3, 110_000_000_000, 0, 1.0)),
        _ => None,
    }
}

/// Ticker record quoting `price` in USD, with circulating supply equal to total.
pub fn t(
    id: &str,
    name: &str,
    symbol: &str,
    rank: u32,
    total_supply: u64,
    max_supply: u64,
    price: f64,
) -> AssetTicker {
    AssetTicker {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        rank,
        circulating_supply: total_supply,
        total_supply,
        max_supply,
        beta_value: 1.0,
        first_data_at: Utc.with_ymd_and_hms(2010, 7, 17, 0, 0, 0).single(),
        last_updated: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single(),
        quotes: TickerQuotes {
            usd: TickerQuote {
                price,
                ..TickerQuote::default()
            },
        },
    }
}
