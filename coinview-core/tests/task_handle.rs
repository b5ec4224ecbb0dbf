use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use coinview_core::TaskHandle;
use coinview_core::task::{Abortable, cancel_impl};

struct FakeHandle {
    finished: bool,
    aborted: Arc<AtomicBool>,
}

impl Abortable for FakeHandle {
    fn abort(&mut self) {
        self.aborted.store(true, Ordering::SeqCst);
    }
    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[test]
fn cancel_impl_aborts_running_handle_once() {
    let aborted = Arc::new(AtomicBool::new(false));
    let mut slot = Some(FakeHandle {
        finished: false,
        aborted: aborted.clone(),
    });
    assert!(cancel_impl(&mut slot));
    assert!(aborted.load(Ordering::SeqCst));
    assert!(slot.is_none());
    assert!(!cancel_impl(&mut slot), "second cancel is a no-op");
}

#[test]
fn cancel_impl_skips_finished_handle() {
    let aborted = Arc::new(AtomicBool::new(false));
    let mut slot = Some(FakeHandle {
        finished: true,
        aborted: aborted.clone(),
    });
    assert!(!cancel_impl(&mut slot));
    assert!(!aborted.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_stops_ticking_task() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let t = ticks.clone();
    let handle = TaskHandle::new(tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(10)).await;
            t.fetch_add(1, Ordering::SeqCst);
        }
    }));

    tokio::time::sleep(Duration::from_millis(35)).await;
    let seen = ticks.load(Ordering::SeqCst);
    assert_eq!(seen, 3);

    drop(handle);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), seen, "no ticks after drop");
}

#[tokio::test]
async fn cancel_reports_finished() {
    let mut handle = TaskHandle::new(tokio::spawn(std::future::pending::<()>()));
    assert!(!handle.is_finished());
    assert!(handle.cancel());
    assert!(handle.is_finished());
}
