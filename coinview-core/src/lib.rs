//! coinview-core
//!
//! Core types, traits, and utilities shared across the coinview workspace.
//!
//! - `types`: re-exported data model, query keys, configuration and errors.
//! - `fetcher`: the `ResourceFetcher` trait and its role traits.
//! - `task`: owned handles for background tasks such as polling timers.
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime. `task::TaskHandle`
//! wraps `tokio::task::JoinHandle<()>`, so code that polls or spawns fetches must
//! run under a Tokio 1.x runtime.
//!
#![warn(missing_docs)]

/// Resource fetcher capability traits and fetch-function adapters.
pub mod fetcher;
/// Owned background task handles.
pub mod task;
pub mod types;

pub use fetcher::{
    FetchFn, MetadataProvider, ResourceFetcher, TickerProvider, metadata_fetch_fn,
    ticker_fetch_fn,
};
pub use task::TaskHandle;
pub use types::*;
