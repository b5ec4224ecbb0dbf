//! Coinview-specific data transfer objects, query identities and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod key;
mod model;

pub use config::{CacheConfig, DetailConfig, PaprikaConfig, QueryOptions};
pub use error::CoinviewError;
pub use key::{QueryKey, ResourceKind};
pub use model::{AssetMetadata, AssetTicker, TickerQuote, TickerQuotes};
