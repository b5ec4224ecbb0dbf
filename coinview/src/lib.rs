//! coinview renders the data layer of a single-asset detail page.
//!
//! Overview
//! - Two independently updating resources per asset: descriptive metadata
//!   (fetched once) and a live ticker (polled while the view is mounted).
//! - Both go through one shared [`QueryCache`], which deduplicates concurrent
//!   requests, keeps the last good payload through refreshes and failures,
//!   and stops polling when the last subscriber leaves.
//! - [`DetailSubscription`] merges the two queries into one [`Detail`]
//!   snapshot with a combined loading flag, a display title and both errors.
//! - The [`view`] module maps the current path to the active sub-view (chart
//!   or price) as a pure function.
//!
//! Key behaviors
//! - A navigation hint (the display name known by the referring view) wins
//!   over the fetched name for the whole lifetime of a mount, so the title
//!   never flashes.
//! - `loading` is only true before the first result of either query lands;
//!   background refreshes and failed refreshes never bring it back.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use coinview::{Coinview, view};
//! use coinview_paprika::PaprikaFetcher;
//!
//! let cv = Coinview::builder()
//!     .with_fetcher(Arc::new(PaprikaFetcher::new_default()?))
//!     .build()?;
//!
//! let route = view::CoinRoute::parse("/btc-bitcoin/chart").expect("route");
//! let mut detail = cv.detail(&route.id, Some("Bitcoin"))?;
//! let snap = detail.settled().await;
//! println!("{} ranked {:?}", snap.title, snap.info.map(|i| i.rank));
//! ```
//!
//! See `coinview/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod detail;
pub mod view;

pub use core::{Coinview, CoinviewBuilder};
pub use detail::{Detail, DetailSubscription};
pub use view::{
    ActiveView, Appearance, CoinRoute, MountedView, SubViewProps, Tab, back_link, mount_view,
    resolve_view, tabs,
};

pub use coinview_query::{QueryCache, QueryHandle, QuerySnapshot, QueryState, QueryStatus};

// Re-export core types for convenience
pub use coinview_core::{
    AssetMetadata, AssetTicker, CacheConfig, CoinviewError, DetailConfig, MetadataProvider,
    PaprikaConfig, QueryKey, QueryOptions, ResourceFetcher, ResourceKind, TickerProvider,
    TickerQuote, TickerQuotes,
};
