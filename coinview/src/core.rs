use std::sync::Arc;
use std::time::Duration;

use coinview_core::{
    AssetMetadata, AssetTicker, CacheConfig, CoinviewError, DetailConfig, QueryKey, QueryOptions,
    ResourceFetcher, metadata_fetch_fn, ticker_fetch_fn,
};
use coinview_query::{QueryCache, QueryHandle};

use crate::detail::DetailSubscription;

/// Entry point tying one resource fetcher to one shared query cache.
///
/// Cloning is cheap; clones share the fetcher and the cache, so two views of
/// the same asset never issue duplicate requests.
#[derive(Clone)]
pub struct Coinview {
    pub(crate) fetcher: Arc<dyn ResourceFetcher>,
    pub(crate) cache: QueryCache,
    pub(crate) cfg: DetailConfig,
}

/// Builder for constructing a `Coinview` with custom configuration.
pub struct CoinviewBuilder {
    fetcher: Option<Arc<dyn ResourceFetcher>>,
    cache: Option<QueryCache>,
    cache_cfg: CacheConfig,
    cfg: DetailConfig,
}

impl Default for CoinviewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinviewBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults: ticker polled every 5 s, metadata fetched once, stale time 0,
    /// unobserved entries collected after 5 minutes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fetcher: None,
            cache: None,
            cache_cfg: CacheConfig::default(),
            cfg: DetailConfig::default(),
        }
    }

    /// Set the resource fetcher every query goes through. Required.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ResourceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Reuse an existing cache instead of creating one.
    ///
    /// The cache keeps its own configuration; [`cache_config`](Self::cache_config)
    /// is ignored when a cache is supplied.
    #[must_use]
    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Settings for the cache created by [`build`](Self::build).
    #[must_use]
    pub fn cache_config(mut self, cfg: CacheConfig) -> Self {
        self.cache_cfg = cfg;
        self
    }

    /// Replace the detail view settings wholesale.
    #[must_use]
    pub fn detail_config(mut self, cfg: DetailConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Polling period of the live ticker; `None` disables polling.
    #[must_use]
    pub const fn ticker_refetch_interval(mut self, every: Option<Duration>) -> Self {
        self.cfg.ticker_refetch_interval = every;
        self
    }

    /// Freshness window of the metadata query.
    #[must_use]
    pub const fn metadata_stale_time(mut self, stale: Duration) -> Self {
        self.cfg.metadata_stale_time = stale;
        self
    }

    /// Title shown while loading when no navigation hint is available.
    #[must_use]
    pub fn loading_placeholder(mut self, text: impl Into<String>) -> Self {
        self.cfg.loading_placeholder = text.into();
        self
    }

    /// Build the `Coinview` instance.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no fetcher has been set via [`with_fetcher`](Self::with_fetcher).
    pub fn build(self) -> Result<Coinview, CoinviewError> {
        let fetcher = self.fetcher.ok_or_else(|| {
            CoinviewError::InvalidArg(
                "no fetcher registered; add one via with_fetcher(...)".to_string(),
            )
        })?;
        let cache = self
            .cache
            .unwrap_or_else(|| QueryCache::with_config(self.cache_cfg));
        #[cfg(feature = "tracing")]
        tracing::debug!(
            fetcher = fetcher.name(),
            vendor = fetcher.vendor(),
            ticker_poll = ?self.cfg.ticker_refetch_interval,
            "built coinview"
        );
        Ok(Coinview {
            fetcher,
            cache,
            cfg: self.cfg,
        })
    }
}

impl std::fmt::Debug for Coinview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coinview")
            .field("fetcher", &self.fetcher.name())
            .field("cache", &self.cache)
            .field("cfg", &self.cfg)
            .finish()
    }
}

impl Coinview {
    /// Start building a new `Coinview` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use coinview_paprika::PaprikaFetcher;
    ///
    /// let cv = coinview::Coinview::builder()
    ///     .with_fetcher(Arc::new(PaprikaFetcher::new_default()?))
    ///     .build()?;
    /// let detail = cv.detail("btc-bitcoin", Some("Bitcoin"))?;
    /// ```
    #[must_use]
    pub fn builder() -> CoinviewBuilder {
        CoinviewBuilder::new()
    }

    /// The shared query cache.
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// The resource fetcher queries go through.
    #[must_use]
    pub fn fetcher(&self) -> &Arc<dyn ResourceFetcher> {
        &self.fetcher
    }

    /// Detail view settings.
    #[must_use]
    pub const fn detail_config(&self) -> &DetailConfig {
        &self.cfg
    }

    pub(crate) fn metadata_options(&self) -> QueryOptions {
        QueryOptions::default().stale_after(self.cfg.metadata_stale_time)
    }

    pub(crate) fn ticker_options(&self) -> QueryOptions {
        QueryOptions {
            refetch_interval: self.cfg.ticker_refetch_interval,
            ..QueryOptions::default().stale_after(self.cfg.ticker_stale_time)
        }
    }

    /// Subscribe to the metadata of `id` (fetched once per stale window).
    ///
    /// # Errors
    /// See [`QueryCache::subscribe`].
    pub fn metadata(&self, id: &str) -> Result<QueryHandle<AssetMetadata>, CoinviewError> {
        self.cache.subscribe(
            QueryKey::metadata(id),
            metadata_fetch_fn(Arc::clone(&self.fetcher)),
            self.metadata_options(),
        )
    }

    /// Subscribe to the live ticker of `id` (polled while subscribed).
    ///
    /// # Errors
    /// See [`QueryCache::subscribe`].
    pub fn ticker(&self, id: &str) -> Result<QueryHandle<AssetTicker>, CoinviewError> {
        self.cache.subscribe(
            QueryKey::ticker(id),
            ticker_fetch_fn(Arc::clone(&self.fetcher)),
            self.ticker_options(),
        )
    }

    /// Mount the detail view for `id`.
    ///
    /// `id` is trimmed before keying the queries. `hint` is the display name
    /// carried over from the referring view; when present and not blank it is
    /// used as the title for the lifetime of the subscription.
    /// Issues the metadata and ticker subscriptions and nothing else.
    ///
    /// # Errors
    /// - `InvalidArg` if `id` is empty or when called outside a Tokio runtime.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "coinview::detail",
            skip(self, id, hint),
            fields(id = %id, hinted = hint.is_some()),
        )
    )]
    pub fn detail(&self, id: &str, hint: Option<&str>) -> Result<DetailSubscription, CoinviewError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CoinviewError::InvalidArg(
                "asset identifier must not be empty".to_string(),
            ));
        }
        let metadata = self.metadata(id)?;
        let ticker = self.ticker(id)?;
        Ok(DetailSubscription::new(
            id.to_string(),
            hint.filter(|h| !h.trim().is_empty()).map(str::to_string),
            self.cfg.loading_placeholder.clone(),
            metadata,
            ticker,
        ))
    }
}
