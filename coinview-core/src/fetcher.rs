use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::{AssetMetadata, AssetTicker, CoinviewError, ResourceKind};

/// Focused role trait for fetchers that provide descriptive asset metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the metadata record for `id` in one network round trip.
    async fn fetch_metadata(&self, id: &str) -> Result<AssetMetadata, CoinviewError>;
}

/// Focused role trait for fetchers that provide live ticker data.
#[async_trait]
pub trait TickerProvider: Send + Sync {
    /// Fetch the ticker record for `id` in one network round trip.
    async fn fetch_ticker(&self, id: &str) -> Result<AssetTicker, CoinviewError>;
}

/// Primary interface implemented by every resource fetcher.
///
/// Capabilities are advertised through the `as_*_provider` accessors; a
/// fetcher that returns `None` for a kind does not serve it.
pub trait ResourceFetcher: Send + Sync {
    /// A stable identifier for logs, e.g. "coinview-paprika".
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise metadata capability.
    fn as_metadata_provider(&self) -> Option<&dyn MetadataProvider> {
        None
    }

    /// Advertise ticker capability.
    fn as_ticker_provider(&self) -> Option<&dyn TickerProvider> {
        None
    }

    /// Whether this fetcher serves the given resource kind.
    fn supports(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Metadata => self.as_metadata_provider().is_some(),
            ResourceKind::Ticker => self.as_ticker_provider().is_some(),
        }
    }
}

/// Type-erased fetch function handed to the query cache.
///
/// Called with the key's identifier; each call performs one attempt.
pub type FetchFn<T> =
    Arc<dyn Fn(String) -> BoxFuture<'static, Result<T, CoinviewError>> + Send + Sync>;

/// Build a fetch function for the metadata resource of `fetcher`.
///
/// Fails each call with `Unsupported` when the fetcher has no metadata capability.
#[must_use]
pub fn metadata_fetch_fn(fetcher: Arc<dyn ResourceFetcher>) -> FetchFn<AssetMetadata> {
    Arc::new(move |id: String| {
        let fetcher = Arc::clone(&fetcher);
        async move {
            let provider = fetcher
                .as_metadata_provider()
                .ok_or_else(|| CoinviewError::unsupported("metadata"))?;
            provider.fetch_metadata(&id).await
        }
        .boxed()
    })
}

/// Build a fetch function for the ticker resource of `fetcher`.
///
/// Fails each call with `Unsupported` when the fetcher has no ticker capability.
#[must_use]
pub fn ticker_fetch_fn(fetcher: Arc<dyn ResourceFetcher>) -> FetchFn<AssetTicker> {
    Arc::new(move |id: String| {
        let fetcher = Arc::clone(&fetcher);
        async move {
            let provider = fetcher
                .as_ticker_provider()
                .ok_or_else(|| CoinviewError::unsupported("ticker"))?;
            provider.fetch_ticker(&id).await
        }
        .boxed()
    })
}
