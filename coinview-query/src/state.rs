use std::sync::Arc;

use coinview_core::CoinviewError;
use tokio::time::Instant;

/// Coarse lifecycle label of a query entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStatus {
    /// Created, no fetch issued yet.
    Idle,
    /// First fetch in flight, no data yet.
    Loading,
    /// Last fetch succeeded.
    Success,
    /// Last fetch failed.
    Error,
}

/// Visible state of one query entry.
///
/// A background refresh never moves a settled entry back to `Loading`;
/// readers keep the last `Success` or `Error` until the new result lands.
#[derive(Debug)]
pub enum QueryState<T> {
    /// Created, no fetch issued yet.
    Idle,
    /// First fetch in flight.
    Loading,
    /// Last fetch succeeded.
    Success {
        /// The fetched payload, shared by every subscriber.
        data: Arc<T>,
        /// When the payload landed; drives staleness.
        fetched_at: Instant,
    },
    /// Last fetch failed.
    Error {
        /// The failure as surfaced by the fetcher.
        error: CoinviewError,
        /// The last successful payload and when it landed, if any.
        stale: Option<(Arc<T>, Instant)>,
    },
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Loading => Self::Loading,
            Self::Success { data, fetched_at } => Self::Success {
                data: Arc::clone(data),
                fetched_at: *fetched_at,
            },
            Self::Error { error, stale } => Self::Error {
                error: error.clone(),
                stale: stale.clone(),
            },
        }
    }
}

impl<T> QueryState<T> {
    /// Coarse lifecycle label.
    #[must_use]
    pub const fn status(&self) -> QueryStatus {
        match self {
            Self::Idle => QueryStatus::Idle,
            Self::Loading => QueryStatus::Loading,
            Self::Success { .. } => QueryStatus::Success,
            Self::Error { .. } => QueryStatus::Error,
        }
    }

    /// Last successfully fetched payload, including stale data kept through a failure.
    #[must_use]
    pub const fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Error {
                stale: Some((data, _)),
                ..
            } => Some(data),
            Self::Error { stale: None, .. } | Self::Idle | Self::Loading => None,
        }
    }

    /// Last failure, if the most recent fetch failed.
    #[must_use]
    pub const fn error(&self) -> Option<&CoinviewError> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    pub(crate) fn succeed(data: T) -> Self {
        Self::Success {
            data: Arc::new(data),
            fetched_at: Instant::now(),
        }
    }

    pub(crate) fn fail(self, error: CoinviewError) -> Self {
        let stale = match self {
            Self::Success { data, fetched_at } => Some((data, fetched_at)),
            Self::Error { stale, .. } => stale,
            Self::Idle | Self::Loading => None,
        };
        Self::Error { error, stale }
    }
}

/// What a subscriber observes: the visible state plus a background-fetch flag.
#[derive(Debug)]
pub struct QuerySnapshot<T> {
    /// Visible state.
    pub state: QueryState<T>,
    /// Whether a fetch for this key is currently in flight.
    pub is_fetching: bool,
}

impl<T> Clone for QuerySnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            is_fetching: self.is_fetching,
        }
    }
}

impl<T> Default for QuerySnapshot<T> {
    fn default() -> Self {
        Self {
            state: QueryState::Idle,
            is_fetching: false,
        }
    }
}

impl<T> QuerySnapshot<T> {
    /// Coarse lifecycle label.
    #[must_use]
    pub const fn status(&self) -> QueryStatus {
        self.state.status()
    }

    /// Last successfully fetched payload.
    #[must_use]
    pub const fn data(&self) -> Option<&Arc<T>> {
        self.state.data()
    }

    /// Last failure.
    #[must_use]
    pub const fn error(&self) -> Option<&CoinviewError> {
        self.state.error()
    }

    /// True while no result has landed yet. Background refreshes of a
    /// settled entry do not count.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, QueryState::Idle | QueryState::Loading)
    }

    /// True when the entry holds a result and nothing is in flight.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !self.is_loading() && !self.is_fetching
    }

    /// Time the current payload landed, kept through failed refreshes.
    #[must_use]
    pub const fn last_fetched_at(&self) -> Option<Instant> {
        match self.state {
            QueryState::Success { fetched_at, .. }
            | QueryState::Error {
                stale: Some((_, fetched_at)),
                ..
            } => Some(fetched_at),
            _ => None,
        }
    }
}
