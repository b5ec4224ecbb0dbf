//! Re-export of foundational types from `coinview-types`.
// Consolidated re-exports so downstream crates can depend on `coinview-core` only

pub use coinview_types::{
    AssetMetadata, AssetTicker, CacheConfig, CoinviewError, DetailConfig, PaprikaConfig,
    QueryKey, QueryOptions, ResourceKind, TickerQuote, TickerQuotes,
};
