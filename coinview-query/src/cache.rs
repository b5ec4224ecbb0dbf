use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use coinview_core::{CacheConfig, CoinviewError, FetchFn, QueryKey, QueryOptions, TaskHandle};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::handle::QueryHandle;
use crate::retry::fetch_with_retry;
use crate::state::{QuerySnapshot, QueryState};

// Critical sections are short and never span an `.await`.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn spawn_owned<F>(fut: F) -> Option<TaskHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    Handle::try_current()
        .ok()
        .map(|rt| TaskHandle::new(rt.spawn(fut)))
}

/// Type-erased view of an entry so one map can hold every payload type.
trait ErasedEntry: Send + Sync {
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
    fn is_collectable(&self) -> bool;
    fn subscriber_count(&self) -> usize;
    fn refetch(self: Arc<Self>) -> bool;
    fn invalidate(self: Arc<Self>);
}

struct Control<T> {
    subscribers: usize,
    in_flight: bool,
    invalidated: bool,
    fetch: Option<FetchFn<T>>,
    options: QueryOptions,
    poller: Option<TaskHandle>,
    gc: Option<TaskHandle>,
}

/// One cache slot. The watch channel carries the visible state; `control`
/// carries bookkeeping that subscribers never see.
pub(crate) struct Entry<T> {
    key: QueryKey,
    cache: Weak<CacheInner>,
    tx: watch::Sender<QuerySnapshot<T>>,
    control: Mutex<Control<T>>,
}

impl<T> Entry<T>
where
    T: Send + Sync + 'static,
{
    fn new(key: QueryKey, cache: Weak<CacheInner>) -> Self {
        let (tx, _rx) = watch::channel(QuerySnapshot::default());
        Self {
            key,
            cache,
            tx,
            control: Mutex::new(Control {
                subscribers: 0,
                in_flight: false,
                invalidated: false,
                fetch: None,
                options: QueryOptions::default(),
                poller: None,
                gc: None,
            }),
        }
    }

    pub(crate) const fn key(&self) -> &QueryKey {
        &self.key
    }

    pub(crate) fn snapshot(&self) -> QuerySnapshot<T> {
        self.tx.borrow().clone()
    }

    pub(crate) fn refetch_now(self: &Arc<Self>) -> bool {
        let mut c = lock(&self.control);
        self.start_fetch(&mut c)
    }

    fn attach(
        self: &Arc<Self>,
        fetch: FetchFn<T>,
        options: QueryOptions,
    ) -> watch::Receiver<QuerySnapshot<T>> {
        let mut c = lock(&self.control);
        c.subscribers += 1;
        if let Some(mut gc) = c.gc.take() {
            gc.cancel();
        }
        // Latest subscriber's fetch function and options win.
        c.fetch = Some(fetch);
        if let Some(period) = options.polling_period()
            && c.poller.as_ref().is_none_or(TaskHandle::is_finished)
        {
            c.poller = self.arm_poller(period);
        }
        let needs_fetch = !c.in_flight && (c.invalidated || self.is_stale(options.stale_time));
        c.options = options;
        if needs_fetch {
            self.start_fetch(&mut c);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(key = %self.key, subscribers = c.subscribers, fetched = needs_fetch, "subscriber attached");
        self.tx.subscribe()
    }

    pub(crate) fn detach(self: &Arc<Self>) {
        let mut c = lock(&self.control);
        c.subscribers = c.subscribers.saturating_sub(1);
        if c.subscribers > 0 {
            return;
        }
        if let Some(mut poller) = c.poller.take() {
            poller.cancel();
        }
        // An in-flight fetch schedules collection itself once it lands.
        if !c.in_flight {
            c.gc = self.schedule_gc();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(key = %self.key, "last subscriber detached, polling stopped");
    }

    fn is_stale(&self, stale_time: Duration) -> bool {
        match &self.tx.borrow().state {
            QueryState::Success { fetched_at, .. } => fetched_at.elapsed() >= stale_time,
            _ => true,
        }
    }

    /// Start a fetch unless one is already in flight.
    ///
    /// Returns `true` if a fetch is running for this key afterwards.
    fn start_fetch(self: &Arc<Self>, c: &mut Control<T>) -> bool {
        if c.in_flight {
            return true;
        }
        let Some(fetch) = c.fetch.clone() else {
            return false;
        };
        let Ok(rt) = Handle::try_current() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(key = %self.key, "no tokio runtime; fetch not started");
            return false;
        };
        c.in_flight = true;
        c.invalidated = false;
        self.tx.send_modify(|snap| {
            snap.is_fetching = true;
            if matches!(snap.state, QueryState::Idle) {
                snap.state = QueryState::Loading;
            }
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(key = %self.key, "fetch started");

        let entry = Arc::clone(self);
        let options = c.options.clone();
        // Detached: a fetch outlives its subscribers and still populates the entry.
        drop(rt.spawn(async move {
            let result = fetch_with_retry(&fetch, entry.key.id(), &options).await;
            entry.settle(result);
        }));
        true
    }

    fn settle(self: &Arc<Self>, result: Result<T, CoinviewError>) {
        let mut c = lock(&self.control);
        c.in_flight = false;
        #[cfg(feature = "tracing")]
        {
            match &result {
                Ok(_) => tracing::debug!(key = %self.key, "fetch succeeded"),
                Err(e) => tracing::warn!(key = %self.key, error = %e, "fetch failed"),
            }
        }
        self.tx.send_modify(move |snap| {
            let previous = std::mem::replace(&mut snap.state, QueryState::Idle);
            snap.state = match result {
                Ok(data) => QueryState::succeed(data),
                Err(error) => previous.fail(error),
            };
            snap.is_fetching = false;
        });
        if c.subscribers == 0 {
            // A timer that fired during the fetch found the entry busy; re-arm it.
            if c.gc.as_ref().is_none_or(TaskHandle::is_finished) {
                c.gc = self.schedule_gc();
            }
        } else if c.invalidated {
            // Invalidated while this fetch was already running.
            self.start_fetch(&mut c);
        }
    }

    fn poll(self: &Arc<Self>) {
        let mut c = lock(&self.control);
        if c.subscribers > 0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(key = %self.key, in_flight = c.in_flight, "poll tick");
            self.start_fetch(&mut c);
        }
    }

    fn arm_poller(self: &Arc<Self>, period: Duration) -> Option<TaskHandle> {
        let entry = Arc::downgrade(self);
        spawn_owned(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(entry) = entry.upgrade() else {
                    break;
                };
                entry.poll();
            }
        })
    }

    fn schedule_gc(self: &Arc<Self>) -> Option<TaskHandle> {
        let cache = self.cache.upgrade()?;
        let gc_time = cache.config.gc_time?;
        let cache = Arc::downgrade(&cache);
        let entry = Arc::downgrade(self);
        spawn_owned(async move {
            tokio::time::sleep(gc_time).await;
            if let (Some(cache), Some(entry)) = (cache.upgrade(), entry.upgrade()) {
                cache.collect(&entry.key, Arc::as_ptr(&entry).cast::<()>());
            }
        })
    }
}

impl<T> ErasedEntry for Entry<T>
where
    T: Send + Sync + 'static,
{
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn is_collectable(&self) -> bool {
        let c = lock(&self.control);
        c.subscribers == 0 && !c.in_flight
    }

    fn subscriber_count(&self) -> usize {
        lock(&self.control).subscribers
    }

    fn refetch(self: Arc<Self>) -> bool {
        self.refetch_now()
    }

    fn invalidate(self: Arc<Self>) {
        let mut c = lock(&self.control);
        c.invalidated = true;
        if c.subscribers > 0 {
            self.start_fetch(&mut c);
        }
    }
}

struct CacheInner {
    config: CacheConfig,
    entries: Mutex<HashMap<QueryKey, Arc<dyn ErasedEntry>>>,
}

impl CacheInner {
    fn collect(&self, key: &QueryKey, expected: *const ()) {
        let mut map = lock(&self.entries);
        let evict = map
            .get(key)
            .is_some_and(|e| std::ptr::addr_eq(Arc::as_ptr(e), expected) && e.is_collectable());
        if evict {
            map.remove(key);
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %key, "evicted unobserved entry");
        }
    }
}

fn downcast<T>(key: &QueryKey, entry: &Arc<dyn ErasedEntry>) -> Result<Arc<Entry<T>>, CoinviewError>
where
    T: Send + Sync + 'static,
{
    Arc::clone(entry).as_any().downcast::<Entry<T>>().map_err(|_| {
        CoinviewError::InvalidArg(format!(
            "query key {key} is already cached with a different payload type"
        ))
    })
}

/// Keyed store of query results shared by every view that needs remote data.
///
/// Construct one per application and pass clones where needed; clones share
/// the same entries. Each entry deduplicates fetches (at most one in flight
/// per key), keeps its last good payload through refreshes and failures, and
/// polls while observed when a subscriber asks for it.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("config", &self.inner.config)
            .field("entries", &self.len())
            .finish()
    }
}

impl QueryCache {
    /// Create a cache with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a cache with explicit settings.
    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                config,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Cache-wide settings.
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Register interest in `key`.
    ///
    /// Creates the entry on first use and starts a fetch unless one is already
    /// in flight or the cached payload is younger than `options.stale_time`.
    /// With a polling period set, the entry re-fetches on that period until
    /// its last subscriber leaves. Dropping the handle unsubscribes.
    ///
    /// # Errors
    /// - `InvalidArg` if `key` is cached with a different payload type, or
    ///   when called outside a Tokio runtime.
    pub fn subscribe<T>(
        &self,
        key: QueryKey,
        fetch: FetchFn<T>,
        options: QueryOptions,
    ) -> Result<QueryHandle<T>, CoinviewError>
    where
        T: Send + Sync + 'static,
    {
        if Handle::try_current().is_err() {
            return Err(CoinviewError::InvalidArg(
                "query subscriptions require a Tokio runtime".to_string(),
            ));
        }
        // The map lock is held while attaching so collection cannot race a new subscriber.
        let mut map = lock(&self.inner.entries);
        let entry = match map.get(&key) {
            Some(existing) => downcast::<T>(&key, existing)?,
            None => {
                let entry = Arc::new(Entry::<T>::new(key.clone(), Arc::downgrade(&self.inner)));
                map.insert(key, Arc::clone(&entry) as Arc<dyn ErasedEntry>);
                entry
            }
        };
        let rx = entry.attach(fetch, options);
        drop(map);
        Ok(QueryHandle::new(entry, rx))
    }

    /// Trigger a re-fetch of `key`, joining one already in flight.
    ///
    /// Returns `false` if the key is unknown or no fetch could be started.
    pub fn refetch(&self, key: &QueryKey) -> bool {
        let entry = lock(&self.inner.entries).get(key).cloned();
        entry.is_some_and(|e| e.refetch())
    }

    /// Mark `key` stale. Observed entries re-fetch now; unobserved ones on
    /// their next subscriber regardless of stale time. If a fetch is already
    /// in flight for an observed entry, a follow-up fetch starts once it lands.
    ///
    /// Returns `false` if the key is unknown.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let entry = lock(&self.inner.entries).get(key).cloned();
        match entry {
            Some(e) => {
                e.invalidate();
                true
            }
            None => false,
        }
    }

    /// Current snapshot of `key` without subscribing.
    ///
    /// # Errors
    /// `InvalidArg` if the key holds a different payload type.
    pub fn peek<T>(&self, key: &QueryKey) -> Result<Option<QuerySnapshot<T>>, CoinviewError>
    where
        T: Send + Sync + 'static,
    {
        let map = lock(&self.inner.entries);
        map.get(key)
            .map(|e| downcast::<T>(key, e).map(|entry| entry.snapshot()))
            .transpose()
    }

    /// Number of live subscriptions for `key`.
    #[must_use]
    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        lock(&self.inner.entries)
            .get(key)
            .map_or(0, |e| e.subscriber_count())
    }

    /// Whether an entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        lock(&self.inner.entries).contains_key(key)
    }

    /// Drop every entry with no subscribers and no fetch in flight.
    ///
    /// Returns the number of evicted entries.
    pub fn prune(&self) -> usize {
        let mut map = lock(&self.inner.entries);
        let before = map.len();
        map.retain(|_, e| !e.is_collectable());
        before - map.len()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner.entries).len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
