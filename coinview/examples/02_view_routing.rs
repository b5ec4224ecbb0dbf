use coinview::view::{self, Appearance, CoinRoute};

fn main() {
    for path in ["/btc-bitcoin", "/btc-bitcoin/chart", "/btc-bitcoin/price", "/btc-bitcoin/news"] {
        let Some(route) = CoinRoute::parse(path) else {
            println!("{path}: no asset");
            continue;
        };
        let strip: Vec<String> = view::tabs(route.view)
            .iter()
            .map(|t| if t.is_active { format!("[{}]", t.label) } else { t.label.to_string() })
            .collect();
        let mounted = view::mount_view(route.view, &route.id, Appearance::Dark);
        println!(
            "{path}: id={} view={:?} tabs={} mounted={mounted:?} back={}",
            route.id,
            route.view,
            strip.join(" | "),
            view::back_link()
        );
    }
}
