mod helpers;

use std::sync::Arc;
use std::time::Duration;

use coinview_core::{CacheConfig, CoinviewError, QueryKey, QueryOptions};
use coinview_query::{QueryCache, QueryStatus};
use helpers::{BTC, Counter, ETH, echo};

fn cache_with_gc(gc: Option<Duration>) -> QueryCache {
    QueryCache::with_config(CacheConfig { gc_time: gc })
}

#[tokio::test(start_paused = true)]
async fn unsubscribe_mid_flight_still_populates_the_entry() {
    let cache = QueryCache::new();
    let counter = Counter::new();
    let key = QueryKey::ticker(BTC);

    let h = cache
        .subscribe(
            key.clone(),
            counter.fetch(Duration::from_millis(100)),
            QueryOptions::default(),
        )
        .unwrap();
    drop(h);
    assert_eq!(cache.subscriber_count(&key), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let snap = cache.peek::<usize>(&key).unwrap().expect("entry kept");
    assert_eq!(snap.status(), QueryStatus::Success);
    assert!(!snap.is_fetching);
    assert_eq!(counter.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn unobserved_entries_are_collected_after_gc_time() {
    let cache = cache_with_gc(Some(Duration::from_secs(1)));
    let counter = Counter::new();
    let key = QueryKey::metadata(BTC);

    let mut h = cache
        .subscribe(key.clone(), counter.fetch(Duration::ZERO), QueryOptions::default())
        .unwrap();
    h.settled().await;
    drop(h);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(cache.contains(&key));
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert!(!cache.contains(&key));
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn resubscribing_cancels_collection() {
    let cache = cache_with_gc(Some(Duration::from_secs(1)));
    let counter = Counter::new();
    let key = QueryKey::metadata(BTC);
    let fetch = counter.fetch(Duration::ZERO);

    let mut h = cache
        .subscribe(key.clone(), Arc::clone(&fetch), QueryOptions::default())
        .unwrap();
    h.settled().await;
    drop(h);

    tokio::time::sleep(Duration::from_millis(500)).await;
    let h = cache
        .subscribe(key.clone(), Arc::clone(&fetch), QueryOptions::default())
        .unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(cache.contains(&key));

    drop(h);
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert!(!cache.contains(&key));
}

#[tokio::test(start_paused = true)]
async fn collection_waits_for_the_in_flight_fetch() {
    let cache = cache_with_gc(Some(Duration::from_secs(1)));
    let counter = Counter::new();
    let key = QueryKey::ticker(BTC);

    let h = cache
        .subscribe(
            key.clone(),
            counter.fetch(Duration::from_secs(2)),
            QueryOptions::default(),
        )
        .unwrap();
    drop(h);

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert!(cache.contains(&key));
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert!(cache.contains(&key));
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert!(!cache.contains(&key));
}

#[tokio::test(start_paused = true)]
async fn refetch_after_last_unsubscribe_is_still_collected() {
    let cache = cache_with_gc(Some(Duration::from_secs(1)));
    let counter = Counter::new();
    let key = QueryKey::ticker(BTC);

    let mut h = cache
        .subscribe(
            key.clone(),
            counter.fetch(Duration::from_secs(2)),
            QueryOptions::default(),
        )
        .unwrap();
    h.settled().await;
    drop(h);

    // The gc timer fires while this fetch is still running.
    assert!(cache.refetch(&key));
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert!(cache.contains(&key));

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(counter.calls(), 2);
    assert!(!cache.contains(&key));
}

#[tokio::test(start_paused = true)]
async fn prune_drops_only_unobserved_settled_entries() {
    let cache = cache_with_gc(None);
    let counter = Counter::new();
    let fetch = counter.fetch(Duration::ZERO);

    let mut kept = cache
        .subscribe(QueryKey::ticker(BTC), Arc::clone(&fetch), QueryOptions::default())
        .unwrap();
    let mut gone = cache
        .subscribe(QueryKey::ticker(ETH), Arc::clone(&fetch), QueryOptions::default())
        .unwrap();
    kept.settled().await;
    gone.settled().await;
    drop(gone);

    tokio::time::sleep(Duration::from_secs(3_600)).await;
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.prune(), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(kept.key()));
}

#[tokio::test(start_paused = true)]
async fn invalidate_refetches_observed_entries_now() {
    let cache = QueryCache::new();
    let counter = Counter::new();
    let key = QueryKey::metadata(BTC);
    let opts = QueryOptions::default().stale_after(Duration::from_secs(3_600));

    let mut h = cache
        .subscribe(key.clone(), counter.fetch(Duration::ZERO), opts)
        .unwrap();
    h.settled().await;

    assert!(cache.invalidate(&key));
    assert!(h.snapshot().is_fetching);
    let snap = h.settled().await;
    assert_eq!(**snap.data().unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn invalidate_during_a_fetch_queues_a_follow_up() {
    let cache = QueryCache::new();
    let counter = Counter::new();
    let key = QueryKey::metadata(BTC);
    let opts = QueryOptions::default().stale_after(Duration::from_secs(3_600));

    let mut h = cache
        .subscribe(key.clone(), counter.fetch(Duration::from_millis(100)), opts)
        .unwrap();
    assert!(h.snapshot().is_fetching);
    assert!(cache.invalidate(&key));
    assert_eq!(counter.calls(), 1);

    let snap = h.settled().await;
    assert_eq!(**snap.data().unwrap(), 2);
    assert_eq!(counter.calls(), 2);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(counter.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn invalidate_marks_unobserved_entries_for_the_next_subscriber() {
    let cache = QueryCache::new();
    let counter = Counter::new();
    let key = QueryKey::metadata(BTC);
    let fetch = counter.fetch(Duration::ZERO);
    let opts = QueryOptions::default().stale_after(Duration::from_secs(3_600));

    let mut h = cache
        .subscribe(key.clone(), Arc::clone(&fetch), opts.clone())
        .unwrap();
    h.settled().await;
    drop(h);

    assert!(cache.invalidate(&key));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(counter.calls(), 1);

    let mut h = cache.subscribe(key, fetch, opts).unwrap();
    assert!(h.snapshot().is_fetching);
    assert_eq!(**h.settled().await.data().unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn unknown_keys_are_reported() {
    let cache = QueryCache::new();
    let key = QueryKey::ticker("nope");
    assert!(!cache.invalidate(&key));
    assert!(!cache.refetch(&key));
    assert!(cache.peek::<usize>(&key).unwrap().is_none());
    assert_eq!(cache.subscriber_count(&key), 0);
}

#[tokio::test(start_paused = true)]
async fn payload_type_mismatch_is_rejected() {
    let cache = QueryCache::new();
    let counter = Counter::new();
    let key = QueryKey::metadata(BTC);

    let mut h = cache
        .subscribe(key.clone(), counter.fetch(Duration::ZERO), QueryOptions::default())
        .unwrap();
    h.settled().await;

    let err = cache
        .subscribe(key.clone(), echo(), QueryOptions::default())
        .expect_err("type mismatch");
    assert!(matches!(err, CoinviewError::InvalidArg(_)));
    assert!(matches!(
        cache.peek::<String>(&key),
        Err(CoinviewError::InvalidArg(_))
    ));
    assert!(cache.peek::<usize>(&key).unwrap().is_some());
    assert_eq!(cache.subscriber_count(&key), 1);
}

#[tokio::test(start_paused = true)]
async fn fetch_receives_the_key_identifier() {
    let cache = QueryCache::new();
    let mut h = cache
        .subscribe(QueryKey::ticker(ETH), echo(), QueryOptions::default())
        .unwrap();
    let snap = h.settled().await;
    assert_eq!(snap.data().unwrap().as_str(), ETH);
}

#[tokio::test(start_paused = true)]
async fn clones_share_entries() {
    let cache = QueryCache::new();
    let other = cache.clone();
    let counter = Counter::new();
    let key = QueryKey::ticker(BTC);

    let _a = cache
        .subscribe(key.clone(), counter.fetch(Duration::ZERO), QueryOptions::default())
        .unwrap();
    let _b = other
        .subscribe(key.clone(), counter.fetch(Duration::ZERO), QueryOptions::default())
        .unwrap();
    assert_eq!(cache.subscriber_count(&key), 2);
    assert_eq!(other.len(), 1);
}

#[test]
fn subscribing_outside_a_runtime_is_an_error() {
    let cache = QueryCache::new();
    let err = cache
        .subscribe(QueryKey::ticker(BTC), echo(), QueryOptions::default())
        .expect_err("no runtime");
    assert!(matches!(err, CoinviewError::InvalidArg(_)));
    assert!(cache.is_empty());
}
