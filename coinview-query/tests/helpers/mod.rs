// Shared fetch functions for query cache tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use coinview_core::{CoinviewError, FetchFn};
use futures::FutureExt;

pub const BTC: &str = "btc-bitcoin";
pub const ETH: &str = "eth-ethereum";

/// Counts calls and resolves each with the call number after `delay`.
#[derive(Clone, Default)]
pub struct Counter {
    calls: Arc<AtomicUsize>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Fetch function returning `1, 2, 3...` for successive calls.
    pub fn fetch(&self, delay: Duration) -> FetchFn<usize> {
        let calls = Arc::clone(&self.calls);
        Arc::new(move |_id: String| {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(n)
            }
            .boxed()
        })
    }

    /// Fetch function that succeeds on the calls listed in `ok_on` (1-based)
    /// and fails with a network error otherwise.
    pub fn flaky(&self, ok_on: &'static [usize]) -> FetchFn<usize> {
        let calls = Arc::clone(&self.calls);
        Arc::new(move |_id: String| {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if ok_on.contains(&n) {
                    Ok(n)
                } else {
                    Err(CoinviewError::network(format!("attempt {n} failed")))
                }
            }
            .boxed()
        })
    }
}

/// Fetch function echoing the identifier it was called with.
pub fn echo() -> FetchFn<String> {
    Arc::new(|id: String| async move { Ok(id) }.boxed())
}
