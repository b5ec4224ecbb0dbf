// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use coinview::{AssetMetadata, AssetTicker, Coinview, ResourceFetcher};
use coinview_mock::{DynamicMockController, DynamicMockFetcher, metadata_fixture, ticker_fixture};

/// Common identifiers used across tests.
pub const BTC: &str = "btc-bitcoin";
pub const ETH: &str = "eth-ethereum";

/// Default ticker polling period of the detail view.
pub const POLL: Duration = Duration::from_millis(5_000);

/// Build a `Coinview` with default settings around `fetcher`.
pub fn coinview_with(fetcher: Arc<dyn ResourceFetcher>) -> Coinview {
    Coinview::builder()
        .with_fetcher(fetcher)
        .build()
        .expect("coinview")
}

/// A `Coinview` over a scriptable fetcher plus its controller.
pub fn scripted() -> (Coinview, DynamicMockController) {
    let (fetcher, controller) = DynamicMockFetcher::new_with_controller("scripted");
    (coinview_with(fetcher), controller)
}

pub fn meta(id: &str, name: &str, rank: u32) -> AssetMetadata {
    metadata_fixture(id, name, "X", rank, true)
}

pub fn ticker(id: &str, total_supply: u64, price: f64) -> AssetTicker {
    ticker_fixture(id, "X", "X", 1, total_supply, total_supply, price)
}
