use tokio::task::JoinHandle;

/// Abstraction over a handle that can be queried for completion and aborted.
pub trait Abortable {
    /// Abort the underlying task if it is still running.
    fn abort(&mut self);
    /// Return `true` if the underlying task has completed.
    fn is_finished(&self) -> bool;
}

impl Abortable for JoinHandle<()> {
    fn abort(&mut self) {
        // JoinHandle::abort takes &self
        Self::abort(self);
    }

    fn is_finished(&self) -> bool {
        Self::is_finished(self)
    }
}

/// Cancellation logic shared by `TaskHandle::cancel` and its `Drop`:
/// take the handle and abort it if it hasn't finished yet.
///
/// Returns `true` if a running task was aborted.
pub fn cancel_impl<H>(inner: &mut Option<H>) -> bool
where
    H: Abortable,
{
    if let Some(mut h) = inner.take()
        && !h.is_finished()
    {
        h.abort();
        return true;
    }
    false
}

/// Owned handle to a background task (e.g. a polling timer).
///
/// The task is aborted when the handle is cancelled or dropped.
#[derive(Debug)]
pub struct TaskHandle {
    inner: Option<JoinHandle<()>>,
}

impl TaskHandle {
    /// Wrap a spawned task.
    #[must_use]
    pub const fn new(inner: JoinHandle<()>) -> Self {
        Self { inner: Some(inner) }
    }

    /// Abort the task. Returns `true` if it was still running.
    pub fn cancel(&mut self) -> bool {
        cancel_impl(&mut self.inner)
    }

    /// Whether the task has completed or was cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inner.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        let _ = cancel_impl(&mut self.inner);
    }
}
