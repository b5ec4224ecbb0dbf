mod common;
use coinview::Coinview;
use common::{get_fetcher, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // 1. Create fetcher (mock in CI when COINVIEW_EXAMPLES_USE_MOCK is set).
    let fetcher = get_fetcher();

    // 2. Build the coinview facade around it.
    let cv = Coinview::builder().with_fetcher(fetcher).build()?;

    // 3. Mount the detail view the way a listing link would: id plus the name it already knows.
    let mut detail = cv.detail("btc-bitcoin", Some("Bitcoin"))?;
    println!("title while loading: {}", detail.snapshot().title);

    // 4. Wait for both queries to land.
    let snap = detail.settled().await;
    if let Some(info) = &snap.info {
        let open_source = if info.open_source { "Yes" } else { "No" };
        println!(
            "rank: {}  symbol: ${}  open source: {open_source}",
            info.rank, info.symbol
        );
    }
    println!(
        "total supply: {:?}  max supply: {:?}",
        snap.total_supply(),
        snap.max_supply()
    );
    println!("price: {:?}", snap.price());
    if let Some(e) = &snap.info_error {
        println!("metadata failed: {e}");
    }
    if let Some(e) = &snap.ticker_error {
        println!("ticker failed: {e}");
    }

    // 5. Watch a couple of ticker refreshes (polled every 5 s).
    for _ in 0..2 {
        detail.changed().await;
        let snap = detail.snapshot();
        println!("update: price={:?} loading={}", snap.price(), snap.loading);
    }

    Ok(())
}
