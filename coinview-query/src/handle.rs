use std::sync::Arc;

use coinview_core::QueryKey;
use tokio::sync::watch;

use crate::cache::Entry;
use crate::state::QuerySnapshot;

/// A live subscription to one query key.
///
/// Dropping the handle unsubscribes; when the last handle for a key goes
/// away its polling timer is cancelled.
pub struct QueryHandle<T>
where
    T: Send + Sync + 'static,
{
    entry: Arc<Entry<T>>,
    rx: watch::Receiver<QuerySnapshot<T>>,
}

impl<T> QueryHandle<T>
where
    T: Send + Sync + 'static,
{
    pub(crate) const fn new(entry: Arc<Entry<T>>, rx: watch::Receiver<QuerySnapshot<T>>) -> Self {
        Self { entry, rx }
    }

    /// Key this handle observes.
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        self.entry.key()
    }

    /// Current state of the entry.
    #[must_use]
    pub fn snapshot(&self) -> QuerySnapshot<T> {
        self.rx.borrow().clone()
    }

    /// Wait until the entry publishes a state this handle has not seen yet.
    pub async fn changed(&mut self) {
        // The sender lives in the entry this handle keeps alive.
        let _ = self.rx.changed().await;
    }

    /// Wait until the entry holds a result and nothing is in flight.
    pub async fn settled(&mut self) -> QuerySnapshot<T> {
        let settled = self
            .rx
            .wait_for(QuerySnapshot::is_settled)
            .await
            .map(|snap| (*snap).clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Trigger a manual re-fetch, joining one already in flight.
    pub fn refetch(&self) -> bool {
        self.entry.refetch_now()
    }

    /// Explicitly end this subscription. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> std::fmt::Debug for QueryHandle<T>
where
    T: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryHandle")
            .field("key", self.key())
            .field("status", &self.rx.borrow().status())
            .finish()
    }
}

impl<T> Drop for QueryHandle<T>
where
    T: Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.entry.detach();
    }
}
