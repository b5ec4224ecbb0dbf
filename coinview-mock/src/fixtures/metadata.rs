use coinview_core::AssetMetadata;

pub fn by_id(id: &str) -> Option<AssetMetadata> {
    match id {
        "btc-bitcoin" => Some(AssetMetadata {
            kind: Some("coin".to_string()),
            description: Some(
                "Bitcoin is a cryptocurrency and worldwide payment system.".to_string(),
            ),
            started_at: Some("2009-01-03T00:00:00Z".to_string()),
            development_status: Some("Working product".to_string()),
            hardware_wallet: true,
            proof_type: Some("Proof of Work".to_string()),
            org_structure: Some("Decentralized".to_string()),
            hash_algorithm: Some("SHA256".to_string()),
            ..m("btc-bitcoin", "Bitcoin", "BTC", 1, true)
        }),
        "eth-ethereum" => Some(AssetMetadata {
            kind: Some("coin".to_string()),
            description: Some("Ethereum is a decentralized platform for smart contracts.".to_string()),
            proof_type: Some("Proof of Stake".to_string()),
            ..m("eth-ethereum", "Ethereum", "ETH", 2, true)
        }),
        "bch-bitcoin-cash" => Some(m("bch-bitcoin-cash", "Bitcoin Cash", "BCH", 17, true)),
        "usdt-tether" => Some(AssetMetadata {
            kind: Some("token".to_string()),
            ..m("usdt-tether", "Tether", "USDT", 3, false)
        }),
        _ => None,
    }
}

/// Minimal metadata record with the given identity fields.
pub fn m(id: &str, name: &str, symbol: &str, rank: u32, open_source: bool) -> AssetMetadata {
    AssetMetadata {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        rank,
        is_new: false,
        is_active: true,
        kind: None,
        description: None,
        message: None,
        open_source,
        started_at: None,
        development_status: None,
        hardware_wallet: false,
        proof_type: None,
        org_structure: None,
        hash_algorithm: None,
        first_data_at: None,
        last_data_at: None,
    }
}
