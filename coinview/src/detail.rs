use std::sync::Arc;

use coinview_core::{AssetMetadata, AssetTicker, CoinviewError};
use coinview_query::{QueryHandle, QuerySnapshot};

/// Combined state of the asset detail view.
///
/// Each side keeps its own payload and error; a failing ticker does not hide
/// the metadata and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    /// True while either query has produced nothing yet.
    pub loading: bool,
    /// Header title: hint, placeholder, fetched name, or empty.
    pub title: String,
    /// Descriptive metadata, including stale data kept through a failed refresh.
    pub info: Option<Arc<AssetMetadata>>,
    /// Live ticker, including stale data kept through a failed refresh.
    pub ticker: Option<Arc<AssetTicker>>,
    /// Last metadata failure.
    pub info_error: Option<CoinviewError>,
    /// Last ticker failure.
    pub ticker_error: Option<CoinviewError>,
}

impl Detail {
    /// Combine the two query snapshots.
    ///
    /// Title order: a non-blank `hint`; `placeholder` while loading; the
    /// fetched display name; the empty string when metadata failed without data.
    #[must_use]
    pub fn resolve(
        info: &QuerySnapshot<AssetMetadata>,
        ticker: &QuerySnapshot<AssetTicker>,
        hint: Option<&str>,
        placeholder: &str,
    ) -> Self {
        let loading = info.is_loading() || ticker.is_loading();
        let info_data = info.data().cloned();
        let title = match hint.filter(|h| !h.trim().is_empty()) {
            Some(h) => h.to_string(),
            None if loading => placeholder.to_string(),
            None => info_data
                .as_ref()
                .map(|m| m.name.clone())
                .unwrap_or_default(),
        };
        Self {
            loading,
            title,
            info: info_data,
            ticker: ticker.data().cloned(),
            info_error: info.error().cloned(),
            ticker_error: ticker.error().cloned(),
        }
    }

    /// Current USD price.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.ticker.as_deref().map(AssetTicker::price)
    }

    /// Total supply from the ticker.
    #[must_use]
    pub fn total_supply(&self) -> Option<u64> {
        self.ticker.as_deref().map(|t| t.total_supply)
    }

    /// Maximum supply from the ticker; `Some(0)` when uncapped.
    #[must_use]
    pub fn max_supply(&self) -> Option<u64> {
        self.ticker.as_deref().map(|t| t.max_supply)
    }

    /// Whether either side currently reports a failure.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.info_error.is_some() || self.ticker_error.is_some()
    }
}

/// Live detail view for one asset. Dropping it releases both queries.
pub struct DetailSubscription {
    id: String,
    hint: Option<String>,
    placeholder: String,
    metadata: QueryHandle<AssetMetadata>,
    ticker: QueryHandle<AssetTicker>,
}

impl DetailSubscription {
    pub(crate) const fn new(
        id: String,
        hint: Option<String>,
        placeholder: String,
        metadata: QueryHandle<AssetMetadata>,
        ticker: QueryHandle<AssetTicker>,
    ) -> Self {
        Self {
            id,
            hint,
            placeholder,
            metadata,
            ticker,
        }
    }

    /// Asset identifier this view was mounted for.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Navigation hint captured at mount.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Current combined state.
    #[must_use]
    pub fn snapshot(&self) -> Detail {
        Detail::resolve(
            &self.metadata.snapshot(),
            &self.ticker.snapshot(),
            self.hint.as_deref(),
            &self.placeholder,
        )
    }

    /// Wait until either underlying query publishes a new state.
    pub async fn changed(&mut self) {
        tokio::select! {
            () = self.metadata.changed() => {}
            () = self.ticker.changed() => {}
        }
    }

    /// Wait until both queries hold a result with nothing in flight.
    pub async fn settled(&mut self) -> Detail {
        let info = self.metadata.settled().await;
        let ticker = self.ticker.settled().await;
        Detail::resolve(&info, &ticker, self.hint.as_deref(), &self.placeholder)
    }

    /// Re-fetch both resources now, joining fetches already in flight.
    pub fn refetch(&self) {
        self.metadata.refetch();
        self.ticker.refetch();
    }

    /// The metadata subscription.
    #[must_use]
    pub const fn metadata(&self) -> &QueryHandle<AssetMetadata> {
        &self.metadata
    }

    /// The ticker subscription.
    #[must_use]
    pub const fn ticker(&self) -> &QueryHandle<AssetTicker> {
        &self.ticker
    }

    /// Release both queries. Equivalent to dropping the subscription.
    pub fn unmount(self) {
        drop(self);
    }
}

impl std::fmt::Debug for DetailSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailSubscription")
            .field("id", &self.id)
            .field("hint", &self.hint)
            .field("metadata", &self.metadata)
            .field("ticker", &self.ticker)
            .finish()
    }
}
