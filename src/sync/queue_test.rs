#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::{Geometry, Position};

fn update(id: &str, x: f64) -> PositionUpdate {
    PositionUpdate::new(id, Geometry::new(Position::new(x, 0.0), 50.0, 20.0))
}

// =============================================================
// RetryPolicy / Pending
// =============================================================

#[test]
fn retry_policy_linear_delay() {
    let policy = RetryPolicy { attempts: 3, base_ms: 20 };
    assert_eq!(policy.delay(1), Duration::from_millis(20));
    assert_eq!(policy.delay(2), Duration::from_millis(40));
}

#[test]
fn retry_policy_always_attempts_once() {
    assert_eq!(RetryPolicy { attempts: 0, base_ms: 1 }.attempts(), 1);
}

#[test]
fn pending_coalesces_same_id_in_place() {
    let mut pending = Pending::default();
    assert!(pending.push(update("a", 1.0)));
    assert!(pending.push(update("b", 1.0)));
    assert!(!pending.push(update("a", 9.0)));
    assert_eq!(pending.len(), 2);

    let first = pending.pop().unwrap();
    assert_eq!(first.id, "a");
    assert_eq!(first.geometry.x, 9.0);
    assert_eq!(pending.pop().unwrap().id, "b");
    assert!(pending.is_empty());
}

// =============================================================
// native worker
// =============================================================

#[cfg(not(target_arch = "wasm32"))]
mod worker {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::sync::{Semaphore, mpsc};

    use super::update;
    use crate::sync::queue::native::deliver;
    use crate::sync::queue::{CoalescingSync, RetryPolicy};
    use crate::sync::{Dispatch, PositionUpdate, SyncError, Transport};

    /// Records every attempt; each attempt waits for a permit and the first
    /// `failures` attempts fail with a transport error.
    #[derive(Clone)]
    struct FakeTransport {
        sent: Arc<Mutex<Vec<PositionUpdate>>>,
        permits: Arc<Semaphore>,
        started: mpsc::UnboundedSender<String>,
        failures: Arc<AtomicUsize>,
        reject: bool,
    }

    impl FakeTransport {
        fn new(permits: usize) -> (Self, mpsc::UnboundedReceiver<String>) {
            let (started, rx) = mpsc::unbounded_channel();
            let transport = Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                permits: Arc::new(Semaphore::new(permits)),
                started,
                failures: Arc::new(AtomicUsize::new(0)),
                reject: false,
            };
            (transport, rx)
        }

        fn sent(&self) -> Vec<PositionUpdate> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for FakeTransport {
        async fn send(&self, update: &PositionUpdate) -> Result<(), SyncError> {
            self.started.send(update.id.clone()).unwrap();
            self.permits.acquire().await.unwrap().forget();
            self.sent.lock().unwrap().push(update.clone());
            if self.reject {
                return Err(SyncError::Rejected("nope".into()));
            }
            let failed = self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failed { Err(SyncError::Request("connection reset".into())) } else { Ok(()) }
        }
    }

    fn fast_retry(attempts: usize) -> RetryPolicy {
        RetryPolicy { attempts, base_ms: 1 }
    }

    #[tokio::test]
    async fn deliver_retries_transport_failures() {
        let (transport, _started) = FakeTransport::new(10);
        transport.failures.store(2, Ordering::SeqCst);

        let result = deliver(&transport, &update("a", 1.0), fast_retry(3)).await;
        assert_eq!(result, Ok(()));
        assert_eq!(transport.sent().len(), 3);
    }

    #[tokio::test]
    async fn deliver_gives_up_after_bound() {
        let (transport, _started) = FakeTransport::new(10);
        transport.failures.store(5, Ordering::SeqCst);

        let result = deliver(&transport, &update("a", 1.0), fast_retry(2)).await;
        assert!(matches!(result, Err(SyncError::Request(_))));
        assert_eq!(transport.sent().len(), 2);
    }

    #[tokio::test]
    async fn deliver_never_retries_rejection() {
        let (mut transport, _started) = FakeTransport::new(10);
        transport.reject = true;

        let result = deliver(&transport, &update("a", 1.0), fast_retry(5)).await;
        assert_eq!(result, Err(SyncError::Rejected("nope".into())));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn updates_during_flight_collapse_to_latest() {
        let (transport, mut started) = FakeTransport::new(0);
        let (sync, worker) = CoalescingSync::spawn(transport.clone(), fast_retry(1), &tokio::runtime::Handle::current());

        sync.dispatch(update("a", 1.0));
        assert_eq!(started.recv().await.as_deref(), Some("a"));

        // First request is parked on the semaphore; these pile up behind it.
        sync.dispatch(update("a", 2.0));
        sync.dispatch(update("b", 1.0));
        sync.dispatch(update("a", 3.0));

        transport.permits.add_permits(10);
        drop(sync);
        tokio::time::timeout(Duration::from_secs(5), worker).await.unwrap().unwrap();

        let sent: Vec<(String, f64)> = transport.sent().into_iter().map(|u| (u.id, u.geometry.x)).collect();
        assert_eq!(sent, [("a".to_owned(), 1.0), ("a".to_owned(), 3.0), ("b".to_owned(), 1.0)]);
    }

    #[tokio::test]
    async fn worker_exits_when_dispatcher_dropped() {
        let (transport, _started) = FakeTransport::new(10);
        let (sync, worker) = CoalescingSync::spawn(transport.clone(), fast_retry(1), &tokio::runtime::Handle::current());
        drop(sync);
        tokio::time::timeout(Duration::from_secs(5), worker).await.unwrap().unwrap();
        assert!(transport.sent().is_empty());
    }
}
