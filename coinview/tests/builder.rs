mod helpers;

use std::sync::Arc;
use std::time::Duration;

use coinview::{CacheConfig, Coinview, CoinviewError, DetailConfig, QueryCache, QueryKey, ResourceKind};
use coinview_mock::{MockBehavior, MockFetcher};
use helpers::{BTC, POLL, meta, scripted, ticker};

#[test]
fn build_without_fetcher_is_rejected() {
    let err = Coinview::builder().build().expect_err("no fetcher");
    assert!(matches!(err, CoinviewError::InvalidArg(_)));
}

#[test]
fn defaults_match_the_detail_view() {
    let cv = Coinview::builder()
        .with_fetcher(MockFetcher::shared())
        .build()
        .expect("coinview");
    let cfg = cv.detail_config();
    assert_eq!(cfg.ticker_refetch_interval, Some(POLL));
    assert_eq!(cfg.loading_placeholder, "Loading...");
    assert_eq!(cv.cache().config().gc_time, Some(Duration::from_secs(300)));
    assert_eq!(cv.fetcher().name(), "coinview-mock");
}

#[test]
fn setters_override_detail_config() {
    let cv = Coinview::builder()
        .with_fetcher(MockFetcher::shared())
        .detail_config(DetailConfig::default())
        .ticker_refetch_interval(None)
        .metadata_stale_time(Duration::from_secs(60))
        .loading_placeholder("…")
        .cache_config(CacheConfig { gc_time: None })
        .build()
        .expect("coinview");
    assert_eq!(cv.detail_config().ticker_refetch_interval, None);
    assert_eq!(cv.detail_config().metadata_stale_time, Duration::from_secs(60));
    assert_eq!(cv.detail_config().loading_placeholder, "…");
    assert_eq!(cv.cache().config().gc_time, None);
}

#[test]
fn detail_outside_a_runtime_is_rejected() {
    let cv = Coinview::builder()
        .with_fetcher(MockFetcher::shared())
        .build()
        .expect("coinview");
    let err = cv.detail(BTC, None).expect_err("no runtime");
    assert!(matches!(err, CoinviewError::InvalidArg(_)));
}

#[test]
fn detail_settles_on_a_blocking_runtime() {
    let cv = Coinview::builder()
        .with_fetcher(MockFetcher::shared())
        .build()
        .expect("coinview");
    let snap = tokio_test::block_on(async {
        let mut detail = cv.detail(BTC, Some("Bitcoin")).expect("detail");
        detail.settled().await
    });
    assert_eq!(snap.title, "Bitcoin");
    assert_eq!(snap.info.expect("info").rank, 1);
}

#[tokio::test(start_paused = true)]
async fn shared_cache_deduplicates_across_instances() {
    let (fetcher, ctl) = coinview_mock::DynamicMockFetcher::new_with_controller("shared");
    ctl.set_metadata_behavior(
        BTC,
        MockBehavior::delayed(Duration::from_millis(20), meta(BTC, "Bitcoin", 1)),
    )
    .await;
    ctl.set_ticker_behavior(BTC, MockBehavior::Return(ticker(BTC, 21_000_000, 1.0)))
        .await;

    let cache = QueryCache::new();
    let a = Coinview::builder()
        .with_fetcher(Arc::clone(&fetcher))
        .with_cache(cache.clone())
        .build()
        .expect("a");
    let b = Coinview::builder()
        .with_fetcher(fetcher)
        .with_cache(cache.clone())
        .build()
        .expect("b");

    let mut da = a.detail(BTC, None).expect("da");
    let mut db = b.detail(BTC, None).expect("db");
    da.settled().await;
    db.settled().await;

    assert_eq!(ctl.calls(ResourceKind::Metadata, BTC).await, 1);
    assert_eq!(cache.subscriber_count(&QueryKey::metadata(BTC)), 2);
}

#[tokio::test(start_paused = true)]
async fn disabled_ticker_polling_fetches_once() {
    let (fetcher, ctl) = coinview_mock::DynamicMockFetcher::new_with_controller("no-poll");
    ctl.set_metadata_behavior(BTC, MockBehavior::Return(meta(BTC, "Bitcoin", 1)))
        .await;
    ctl.set_ticker_behavior(BTC, MockBehavior::Return(ticker(BTC, 21_000_000, 1.0)))
        .await;
    let cv = Coinview::builder()
        .with_fetcher(fetcher)
        .ticker_refetch_interval(None)
        .build()
        .expect("coinview");

    let mut detail = cv.detail(BTC, None).expect("detail");
    detail.settled().await;
    tokio::time::sleep(POLL * 3).await;
    assert_eq!(ctl.calls(ResourceKind::Ticker, BTC).await, 1);
}

#[tokio::test(start_paused = true)]
async fn custom_placeholder_is_shown_while_loading() {
    let (cv, ctl) = scripted();
    ctl.set_metadata_behavior(BTC, MockBehavior::Hang).await;
    ctl.set_ticker_behavior(BTC, MockBehavior::Hang).await;
    let cv = Coinview::builder()
        .with_fetcher(Arc::clone(cv.fetcher()))
        .loading_placeholder("Fetching")
        .build()
        .expect("coinview");

    let detail = cv.detail(BTC, None).expect("detail");
    tokio::time::sleep(Duration::from_secs(1)).await;
    let snap = detail.snapshot();
    assert!(snap.loading);
    assert_eq!(snap.title, "Fetching");
    assert!(snap.info.is_none() && snap.ticker.is_none());
}
