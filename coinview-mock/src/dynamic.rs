use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use coinview_core::{
    AssetMetadata, AssetTicker, CoinviewError, MetadataProvider, ResourceFetcher, ResourceKind,
    TickerProvider,
};

/// Instruction for how a fetch should behave for a given identifier.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(CoinviewError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
    /// Wait for the given duration, then behave as the inner instruction.
    Delay(Duration, Box<MockBehavior<T>>),
}

impl<T> MockBehavior<T> {
    /// Helper: return `value` after `delay`.
    pub fn delayed(delay: Duration, value: T) -> Self {
        Self::Delay(delay, Box::new(Self::Return(value)))
    }

    /// Helper: fail with `error` after `delay`.
    pub fn delayed_fail(delay: Duration, error: CoinviewError) -> Self {
        Self::Delay(delay, Box::new(Self::Fail(error)))
    }
}

/// Scripted behaviors for one identifier. Each call consumes the front
/// entry; the last one repeats.
struct Script<T> {
    steps: VecDeque<MockBehavior<T>>,
}

impl<T: Clone> Script<T> {
    fn next(&mut self) -> Option<MockBehavior<T>> {
        if self.steps.len() > 1 {
            self.steps.pop_front()
        } else {
            self.steps.front().cloned()
        }
    }
}

#[derive(Default)]
struct InternalState {
    metadata_rules: HashMap<String, Script<AssetMetadata>>,
    ticker_rules: HashMap<String, Script<AssetTicker>>,
    calls: HashMap<(ResourceKind, String), usize>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for metadata fetches of `id`.
    pub async fn set_metadata_behavior(&self, id: &str, behavior: MockBehavior<AssetMetadata>) {
        self.script_metadata(id, vec![behavior]).await;
    }

    /// Set the behavior for ticker fetches of `id`.
    pub async fn set_ticker_behavior(&self, id: &str, behavior: MockBehavior<AssetTicker>) {
        self.script_ticker(id, vec![behavior]).await;
    }

    /// Script successive metadata fetches of `id`; the last step repeats.
    pub async fn script_metadata(&self, id: &str, steps: Vec<MockBehavior<AssetMetadata>>) {
        let mut guard = self.state.lock().await;
        guard.metadata_rules.insert(
            id.to_string(),
            Script {
                steps: steps.into(),
            },
        );
    }

    /// Script successive ticker fetches of `id`; the last step repeats.
    pub async fn script_ticker(&self, id: &str, steps: Vec<MockBehavior<AssetTicker>>) {
        let mut guard = self.state.lock().await;
        guard.ticker_rules.insert(
            id.to_string(),
            Script {
                steps: steps.into(),
            },
        );
    }

    /// Number of fetches issued for `(kind, id)` so far.
    pub async fn calls(&self, kind: ResourceKind, id: &str) -> usize {
        let guard = self.state.lock().await;
        guard
            .calls
            .get(&(kind, id.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Total number of fetches issued across all keys.
    pub async fn total_calls(&self) -> usize {
        let guard = self.state.lock().await;
        guard.calls.values().sum()
    }

    /// Clear all configured behaviors and call counters.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.metadata_rules.clear();
        guard.ticker_rules.clear();
        guard.calls.clear();
    }
}

/// A fetcher that defers all behavior to an external controller.
pub struct DynamicMockFetcher {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockFetcher {
    /// Create a new dynamic mock fetcher and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn ResourceFetcher>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn ResourceFetcher>, controller)
    }
}

async fn play<T>(
    behavior: Option<MockBehavior<T>>,
    capability: &'static str,
) -> Result<T, CoinviewError> {
    let mut next = behavior;
    loop {
        match next {
            Some(MockBehavior::Return(v)) => return Ok(v),
            Some(MockBehavior::Fail(e)) => return Err(e),
            Some(MockBehavior::Hang) => return std::future::pending().await,
            Some(MockBehavior::Delay(d, inner)) => {
                tokio::time::sleep(d).await;
                next = Some(*inner);
            }
            None => return Err(CoinviewError::unsupported(capability)),
        }
    }
}

impl ResourceFetcher for DynamicMockFetcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_metadata_provider(&self) -> Option<&dyn MetadataProvider> {
        Some(self as &dyn MetadataProvider)
    }

    fn as_ticker_provider(&self) -> Option<&dyn TickerProvider> {
        Some(self as &dyn TickerProvider)
    }
}

#[async_trait]
impl MetadataProvider for DynamicMockFetcher {
    async fn fetch_metadata(&self, id: &str) -> Result<AssetMetadata, CoinviewError> {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard
                .calls
                .entry((ResourceKind::Metadata, id.to_string()))
                .or_default() += 1;
            guard.metadata_rules.get_mut(id).and_then(Script::next)
        };
        play(behavior, "metadata").await
    }
}

#[async_trait]
impl TickerProvider for DynamicMockFetcher {
    async fn fetch_ticker(&self, id: &str) -> Result<AssetTicker, CoinviewError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard
                .calls
                .entry((ResourceKind::Ticker, id.to_string()))
                .or_default() += 1;
            guard.ticker_rules.get_mut(id).and_then(Script::next)
        };
        play(behavior, "ticker").await
    }
}
