pub mod metadata;
pub mod tickers;
