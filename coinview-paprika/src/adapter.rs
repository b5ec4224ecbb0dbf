#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use coinview_core::{AssetMetadata, AssetTicker, CoinviewError, PaprikaConfig};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

/// Coin metadata abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait PaprikaCoins: Send + Sync {
    /// Fetch the `/coins/{id}` record.
    async fn coin(&self, id: &str) -> Result<AssetMetadata, CoinviewError>;
}

/// Ticker abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait PaprikaTickers: Send + Sync {
    /// Fetch the `/tickers/{id}` record.
    async fn ticker(&self, id: &str) -> Result<AssetTicker, CoinviewError>;
}

/// Production adapter backed by a shared `reqwest::Client`.
///
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone, Debug)]
pub struct RealAdapter {
    client: reqwest::Client,
    base: Url,
}

impl RealAdapter {
    /// Build an adapter for `config`.
    ///
    /// # Errors
    /// - `InvalidArg` if the base URL does not parse or cannot carry path segments.
    /// - `Network` if the HTTP client cannot be built.
    pub fn new(config: &PaprikaConfig) -> Result<Self, CoinviewError> {
        let trimmed = config.base_url.trim().trim_end_matches('/');
        let base = Url::parse(trimmed).map_err(|e| {
            CoinviewError::InvalidArg(format!("invalid base_url '{trimmed}': {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(CoinviewError::InvalidArg(format!(
                "base_url '{trimmed}' cannot carry a path"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoinviewError::network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base })
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, resource: &str, id: &str) -> Result<Url, CoinviewError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CoinviewError::InvalidArg(format!("base_url '{}' cannot carry a path", self.base))
            })?
            .pop_if_empty()
            .push(resource)
            .push(id);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
        what: &str,
    ) -> Result<T, CoinviewError> {
        let url = self.endpoint(resource, id)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e, what))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CoinviewError::not_found(what.to_string()));
        }
        if !status.is_success() {
            return Err(CoinviewError::network(format!("status {status}: {what}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport_err(&e, what))?;
        serde_json::from_slice(&body).map_err(|e| CoinviewError::decode(format!("{what}: {e}")))
    }
}

fn map_transport_err(e: &reqwest::Error, context: &str) -> CoinviewError {
    if e.is_timeout() {
        CoinviewError::network(format!("timeout: {context}"))
    } else {
        CoinviewError::network(format!("{context}: {e}"))
    }
}

#[async_trait]
impl PaprikaCoins for RealAdapter {
    async fn coin(&self, id: &str) -> Result<AssetMetadata, CoinviewError> {
        self.get_json("coins", id, &format!("coin {id}")).await
    }
}

#[async_trait]
impl PaprikaTickers for RealAdapter {
    async fn ticker(&self, id: &str) -> Result<AssetTicker, CoinviewError> {
        self.get_json("tickers", id, &format!("ticker {id}")).await
    }
}

#[cfg(feature = "test-adapters")]
impl dyn PaprikaCoins {
    /// Test helper that builds a `PaprikaCoins` from a closure over the identifier.
    pub fn from_fn<F>(f: F) -> Arc<dyn PaprikaCoins>
    where
        F: Send + Sync + 'static + Fn(&str) -> Result<AssetMetadata, CoinviewError>,
    {
        struct FnCoins<F>(F);
        #[async_trait]
        impl<F> PaprikaCoins for FnCoins<F>
        where
            F: Send + Sync + 'static + Fn(&str) -> Result<AssetMetadata, CoinviewError>,
        {
            async fn coin(&self, id: &str) -> Result<AssetMetadata, CoinviewError> {
                (self.0)(id)
            }
        }
        Arc::new(FnCoins(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn PaprikaTickers {
    /// Test helper that builds a `PaprikaTickers` from a closure over the identifier.
    pub fn from_fn<F>(f: F) -> Arc<dyn PaprikaTickers>
    where
        F: Send + Sync + 'static + Fn(&str) -> Result<AssetTicker, CoinviewError>,
    {
        struct FnTickers<F>(F);
        #[async_trait]
        impl<F> PaprikaTickers for FnTickers<F>
        where
            F: Send + Sync + 'static + Fn(&str) -> Result<AssetTicker, CoinviewError>,
        {
            async fn ticker(&self, id: &str) -> Result<AssetTicker, CoinviewError> {
                (self.0)(id)
            }
        }
        Arc::new(FnTickers(f))
    }
}

/// Hand out the individual adapters as trait objects. Adapters that only
/// implement part of the API keep the defaults, which fail with `Unsupported`.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn PaprikaCoins>`.
    fn clone_arc_coins(&self) -> Arc<dyn PaprikaCoins> {
        <dyn PaprikaCoins>::from_fn(|_| Err(CoinviewError::unsupported("metadata")))
    }
    /// Clone as `Arc<dyn PaprikaTickers>`.
    fn clone_arc_tickers(&self) -> Arc<dyn PaprikaTickers> {
        <dyn PaprikaTickers>::from_fn(|_| Err(CoinviewError::unsupported("ticker")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_coins(&self) -> Arc<dyn PaprikaCoins> {
        Arc::new(self.clone()) as Arc<dyn PaprikaCoins>
    }
    fn clone_arc_tickers(&self) -> Arc<dyn PaprikaTickers> {
        Arc::new(self.clone()) as Arc<dyn PaprikaTickers>
    }
}
