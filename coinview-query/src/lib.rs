//! coinview-query
//!
//! A keyed query cache for remote resources.
//!
//! - One entry per [`QueryKey`](coinview_core::QueryKey); concurrent
//!   subscribers share one in-flight fetch and one result.
//! - Entries follow `Idle -> Loading -> {Success, Error}`; background
//!   refreshes keep the last payload visible (stale-while-revalidate).
//! - Polling runs only while a key has subscribers.
//! - Unobserved entries are evicted after the configured gc time or by
//!   [`QueryCache::prune`].
#![warn(missing_docs)]

mod cache;
mod handle;
mod retry;
mod state;

pub use crate::cache::QueryCache;
pub use crate::handle::QueryHandle;
pub use crate::state::{QuerySnapshot, QueryState, QueryStatus};
