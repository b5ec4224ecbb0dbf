mod helpers;

use std::sync::Arc;

use coinview::{AssetMetadata, AssetTicker, CoinviewError, Detail, QuerySnapshot, QueryState};
use helpers::{BTC, meta, ticker};
use proptest::prelude::*;

const PLACEHOLDER: &str = "Loading...";

fn state<T>(pick: u8, value: T) -> QueryState<T> {
    match pick {
        0 => QueryState::Idle,
        1 => QueryState::Loading,
        2 => QueryState::Success {
            data: Arc::new(value),
            fetched_at: tokio::time::Instant::now(),
        },
        3 => QueryState::Error {
            error: CoinviewError::network("down"),
            stale: None,
        },
        _ => QueryState::Error {
            error: CoinviewError::network("down"),
            stale: Some((Arc::new(value), tokio::time::Instant::now())),
        },
    }
}

fn snapshot<T>(pick: u8, value: T, is_fetching: bool) -> QuerySnapshot<T> {
    QuerySnapshot {
        state: state(pick, value),
        is_fetching,
    }
}

fn info(pick: u8, fetching: bool) -> QuerySnapshot<AssetMetadata> {
    snapshot(pick, meta(BTC, "Bitcoin Cash", 17), fetching)
}

fn tick(pick: u8, fetching: bool) -> QuerySnapshot<AssetTicker> {
    snapshot(pick, ticker(BTC, 21_000_000, 1.0), fetching)
}

#[test]
fn loading_only_before_first_results() {
    let d = Detail::resolve(&info(2, true), &tick(1, true), None, PLACEHOLDER);
    assert!(d.loading);
    assert_eq!(d.title, PLACEHOLDER);
    assert!(d.info.is_some());

    let refreshing = Detail::resolve(&info(2, true), &tick(2, true), None, PLACEHOLDER);
    assert!(!refreshing.loading);
    assert_eq!(refreshing.title, "Bitcoin Cash");
}

#[test]
fn stale_data_survives_an_error() {
    let d = Detail::resolve(&info(4, false), &tick(4, false), None, PLACEHOLDER);
    assert!(!d.loading);
    assert_eq!(d.title, "Bitcoin Cash");
    assert_eq!(d.price(), Some(1.0));
    assert!(d.has_error());
}

proptest! {
    #[test]
    fn title_and_flags_follow_the_two_snapshots(
        ip in 0u8..5,
        tp in 0u8..5,
        ifetch in any::<bool>(),
        tfetch in any::<bool>(),
        hint in proptest::option::of("[A-Za-z ]{0,10}"),
    ) {
        let i = info(ip, ifetch);
        let t = tick(tp, tfetch);
        let d = Detail::resolve(&i, &t, hint.as_deref(), PLACEHOLDER);

        let loading = ip < 2 || tp < 2;
        prop_assert_eq!(d.loading, loading);

        let expected = match hint.as_deref().filter(|h| !h.trim().is_empty()) {
            Some(h) => h.to_string(),
            None if loading => PLACEHOLDER.to_string(),
            None if ip == 2 || ip == 4 => "Bitcoin Cash".to_string(),
            None => String::new(),
        };
        prop_assert_eq!(&d.title, &expected);

        prop_assert_eq!(d.info.is_some(), ip == 2 || ip == 4);
        prop_assert_eq!(d.ticker.is_some(), tp == 2 || tp == 4);
        prop_assert_eq!(d.info_error.is_some(), ip >= 3);
        prop_assert_eq!(d.ticker_error.is_some(), tp >= 3);
    }
}
