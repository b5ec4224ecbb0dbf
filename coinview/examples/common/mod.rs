use coinview::ResourceFetcher;
use std::sync::Arc;

#[must_use]
pub fn get_fetcher() -> Arc<dyn ResourceFetcher> {
    if std::env::var("COINVIEW_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Fetcher for CI) ---");
        coinview_mock::MockFetcher::shared()
    } else {
        match coinview_paprika::PaprikaFetcher::new_default() {
            Ok(f) => Arc::new(f),
            Err(e) => {
                println!("--- (coinpaprika unavailable: {e}; using Mock Fetcher) ---");
                coinview_mock::MockFetcher::shared()
            }
        }
    }
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
