//! coinview-mock
//!
//! Deterministic fetchers for tests and demos.
//!
//! - [`MockFetcher`] serves static fixtures for a handful of well-known assets.
//! - [`DynamicMockFetcher`] defers every call to rules set through a
//!   [`DynamicMockController`] and records how often each resource was fetched.
#![warn(missing_docs)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use coinview_core::{
    AssetMetadata, AssetTicker, CoinviewError, MetadataProvider, ResourceFetcher, TickerProvider,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockFetcher, MockBehavior};
pub use fixtures::metadata::m as metadata_fixture;
pub use fixtures::tickers::t as ticker_fixture;

/// Mock fetcher for CI-safe tests. Provides deterministic data from static fixtures.
///
/// The identifier `FAIL` fails with a network error; unknown identifiers are `NotFound`.
#[derive(Default)]
pub struct MockFetcher {
    metadata_calls: AtomicUsize,
    ticker_calls: AtomicUsize,
}

impl MockFetcher {
    /// Create a new fixture fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            metadata_calls: AtomicUsize::new(0),
            ticker_calls: AtomicUsize::new(0),
        }
    }

    /// Create a new fixture fetcher behind an `Arc`, ready to hand to a cache.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of metadata fetches served so far.
    #[must_use]
    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    /// Number of ticker fetches served so far.
    #[must_use]
    pub fn ticker_calls(&self) -> usize {
        self.ticker_calls.load(Ordering::SeqCst)
    }

    fn maybe_fail(id: &str, capability: &'static str) -> Result<(), CoinviewError> {
        if id == "FAIL" {
            return Err(CoinviewError::network(format!(
                "forced failure: {capability}"
            )));
        }
        Ok(())
    }
}

impl ResourceFetcher for MockFetcher {
    fn name(&self) -> &'static str {
        "coinview-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_metadata_provider(&self) -> Option<&dyn MetadataProvider> {
        Some(self as &dyn MetadataProvider)
    }

    fn as_ticker_provider(&self) -> Option<&dyn TickerProvider> {
        Some(self as &dyn TickerProvider)
    }
}

#[async_trait]
impl MetadataProvider for MockFetcher {
    async fn fetch_metadata(&self, id: &str) -> Result<AssetMetadata, CoinviewError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        Self::maybe_fail(id, "metadata")?;
        fixtures::metadata::by_id(id).ok_or_else(|| CoinviewError::not_found(format!("coin {id}")))
    }
}

#[async_trait]
impl TickerProvider for MockFetcher {
    async fn fetch_ticker(&self, id: &str) -> Result<AssetTicker, CoinviewError> {
        self.ticker_calls.fetch_add(1, Ordering::SeqCst);
        Self::maybe_fail(id, "ticker")?;
        fixtures::tickers::by_id(id).ok_or_else(|| CoinviewError::not_found(format!("ticker {id}")))
    }
}
