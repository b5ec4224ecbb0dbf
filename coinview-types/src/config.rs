//! Configuration types shared across the cache, the detail view and fetchers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-subscription options recognized by the query cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Polling period while the key has at least one subscriber.
    ///
    /// `None` (or a zero duration) means fetch-once.
    pub refetch_interval: Option<Duration>,
    /// A new subscriber joining a settled entry younger than this does not
    /// trigger a fetch.
    pub stale_time: Duration,
    /// Additional attempts after a failed fetch, inside the same in-flight operation.
    pub retry_count: u32,
    /// Delay between attempts.
    pub retry_delay: Duration,
    /// Random jitter percentage [0, 100] added to each retry delay.
    pub retry_jitter_percent: u8,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            refetch_interval: None,
            stale_time: Duration::ZERO,
            retry_count: 0,
            retry_delay: Duration::from_secs(1),
            retry_jitter_percent: 0,
        }
    }
}

impl QueryOptions {
    /// Enable polling at `period`.
    #[must_use]
    pub const fn refetch_every(mut self, period: Duration) -> Self {
        self.refetch_interval = Some(period);
        self
    }

    /// Set the freshness window used to suppress redundant fetches.
    #[must_use]
    pub const fn stale_after(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    /// Retry failed fetches `count` times, waiting `delay` between attempts.
    #[must_use]
    pub const fn retry(mut self, count: u32, delay: Duration) -> Self {
        self.retry_count = count;
        self.retry_delay = delay;
        self
    }

    /// Polling period, with zero normalized to `None`.
    #[must_use]
    pub fn polling_period(&self) -> Option<Duration> {
        self.refetch_interval.filter(|p| !p.is_zero())
    }
}

/// Cache-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long an unobserved entry is retained before it is evicted.
    ///
    /// `None` keeps unobserved entries until `prune` is called explicitly.
    pub gc_time: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            gc_time: Some(Duration::from_secs(5 * 60)),
        }
    }
}

/// Settings for the asset detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailConfig {
    /// Polling period of the live ticker query.
    pub ticker_refetch_interval: Option<Duration>,
    /// Freshness window of the metadata query.
    pub metadata_stale_time: Duration,
    /// Freshness window of the ticker query.
    pub ticker_stale_time: Duration,
    /// Title shown while loading when no navigation hint is available.
    pub loading_placeholder: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            ticker_refetch_interval: Some(Duration::from_secs(5)),
            metadata_stale_time: Duration::ZERO,
            ticker_stale_time: Duration::ZERO,
            loading_placeholder: "Loading...".to_string(),
        }
    }
}

/// Settings for the coinpaprika REST fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaprikaConfig {
    /// API base URL without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for PaprikaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coinpaprika.com/v1".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}
