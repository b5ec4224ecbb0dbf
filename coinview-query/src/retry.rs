use std::time::Duration;

use coinview_core::{CoinviewError, FetchFn, QueryOptions};
use rand::Rng;

/// Add up to `jitter_percent` of `base` as random delay.
pub(crate) fn jitter_wait(base: Duration, jitter_percent: u8) -> Duration {
    if jitter_percent == 0 || base.is_zero() {
        return base;
    }
    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let jitter_range = std::cmp::max(1, base_ms.saturating_mul(u64::from(jitter_percent)) / 100);
    let mut rng = rand::rng();
    base + Duration::from_millis(rng.random_range(0..jitter_range))
}

/// Run one logical fetch: the first attempt plus up to `retry_count` retries.
pub(crate) async fn fetch_with_retry<T>(
    fetch: &FetchFn<T>,
    id: &str,
    opts: &QueryOptions,
) -> Result<T, CoinviewError> {
    let mut attempt: u32 = 0;
    loop {
        match fetch(id.to_string()).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < opts.retry_count => {
                attempt += 1;
                #[cfg(feature = "tracing")]
                tracing::debug!(id, attempt, error = %err, "fetch failed, retrying");
                #[cfg(not(feature = "tracing"))]
                drop(err);
                tokio::time::sleep(jitter_wait(opts.retry_delay, opts.retry_jitter_percent)).await;
            }
            Err(err) => return Err(err),
        }
    }
}
