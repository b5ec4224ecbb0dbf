//! coinview-paprika
//!
//! Public fetcher that implements `ResourceFetcher` on top of the coinpaprika
//! REST API. Exposes asset metadata (`/coins/{id}`) and live tickers
//! (`/tickers/{id}`).
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{PaprikaCoins, PaprikaTickers, RealAdapter};
use async_trait::async_trait;
use coinview_core::{
    AssetMetadata, AssetTicker, CoinviewError, MetadataProvider, PaprikaConfig, ResourceFetcher,
    TickerProvider,
};

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type CoinsAdapter = Arc<dyn PaprikaCoins>;
#[cfg(not(feature = "test-adapters"))]
type CoinsAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type TickersAdapter = Arc<dyn PaprikaTickers>;
#[cfg(not(feature = "test-adapters"))]
type TickersAdapter = AdapterArc;

/// Public fetcher type. Production users will construct with `PaprikaFetcher::new_default()`.
pub struct PaprikaFetcher {
    coins: CoinsAdapter,
    tickers: TickersAdapter,
}

impl PaprikaFetcher {
    /// Stable fetcher name, also used in error context.
    pub const NAME: &'static str = "coinview-paprika";

    fn validate_id(id: &str) -> Result<&str, CoinviewError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CoinviewError::InvalidArg(
                "asset identifier must not be empty".to_string(),
            ));
        }
        Ok(id)
    }

    /// Build against the public coinpaprika API with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new_default() -> Result<Self, CoinviewError> {
        Self::new(&PaprikaConfig::default())
    }

    /// Build from explicit settings.
    ///
    /// # Errors
    /// - `InvalidArg` if `config.base_url` is not a usable URL.
    /// - `Network` if the HTTP client cannot be built.
    pub fn new(config: &PaprikaConfig) -> Result<Self, CoinviewError> {
        let adapter = RealAdapter::new(config)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(base = %adapter.base(), timeout = ?config.timeout, "built coinpaprika fetcher");
        Ok(Self::from_adapter(&adapter))
    }

    /// Convenience: build and wrap in an `Arc<dyn ResourceFetcher>`.
    ///
    /// # Errors
    /// Same as [`PaprikaFetcher::new`].
    pub fn shared(config: &PaprikaConfig) -> Result<Arc<dyn ResourceFetcher>, CoinviewError> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// Accepts a borrowed adapter to avoid unnecessary moves.
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            coins: adapter.clone_arc_coins(),
            tickers: adapter.clone_arc_tickers(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            coins: Arc::clone(&shared),
            tickers: shared,
        }
    }
}

#[async_trait]
impl MetadataProvider for PaprikaFetcher {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "coinview::paprika",
            skip(self, id),
            fields(id = %id),
        )
    )]
    async fn fetch_metadata(&self, id: &str) -> Result<AssetMetadata, CoinviewError> {
        let id = Self::validate_id(id)?;
        self.coins.coin(id).await
    }
}

#[async_trait]
impl TickerProvider for PaprikaFetcher {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "coinview::paprika",
            skip(self, id),
            fields(id = %id),
        )
    )]
    async fn fetch_ticker(&self, id: &str) -> Result<AssetTicker, CoinviewError> {
        let id = Self::validate_id(id)?;
        self.tickers.ticker(id).await
    }
}

impl ResourceFetcher for PaprikaFetcher {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "coinpaprika"
    }

    fn as_metadata_provider(&self) -> Option<&dyn MetadataProvider> {
        Some(self as &dyn MetadataProvider)
    }

    fn as_ticker_provider(&self) -> Option<&dyn TickerProvider> {
        Some(self as &dyn TickerProvider)
    }
}
