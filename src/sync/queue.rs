//! Coalescing outbound queue.
//!
//! DESIGN
//! ======
//! Opt-in alternative to per-event dispatch. Updates for the same element
//! collapse into the latest value while a request is in flight, and a single
//! worker ships them one at a time in first-seen order. This trades request
//! volume for latency: the store sees fewer, later updates, but never an older
//! geometry after a newer one for the same element.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures are retried with linear back-off up to
//! [`RetryPolicy::attempts`]; store rejections are reported once and dropped.

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;

use std::collections::VecDeque;
use std::time::Duration;

use super::PositionUpdate;
#[cfg(not(target_arch = "wasm32"))]
pub use self::native::CoalescingSync;

/// Bounded retry with linear back-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total delivery attempts; values below 1 mean a single attempt.
    pub attempts: usize,
    /// Back-off step in milliseconds; attempt `n` waits `n * base_ms`.
    pub base_ms: u64,
}

impl RetryPolicy {
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.max(1)
    }

    /// Delay after the given failed attempt (1-based).
    #[must_use]
    pub fn delay(&self, attempt: usize) -> Duration {
        Duration::from_millis((attempt as u64).saturating_mul(self.base_ms))
    }
}

/// Pending updates, at most one per element, in first-seen order.
#[derive(Debug, Default)]
pub struct Pending {
    updates: VecDeque<PositionUpdate>,
}

impl Pending {
    /// Queue `update`, replacing any pending geometry for the same element.
    ///
    /// Returns `true` when the element was not already pending.
    pub fn push(&mut self, update: PositionUpdate) -> bool {
        if let Some(slot) = self.updates.iter_mut().find(|p| p.id == update.id) {
            slot.geometry = update.geometry;
            false
        } else {
            self.updates.push_back(update);
            true
        }
    }

    pub fn pop(&mut self) -> Option<PositionUpdate> {
        self.updates.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use tokio::runtime::Handle;
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;
    use tracing::{info, warn};

    use super::{Pending, RetryPolicy};
    use crate::sync::{Dispatch, PositionUpdate, SyncError, Transport, report};

    /// Dispatcher feeding a single coalescing worker task.
    pub struct CoalescingSync {
        tx: mpsc::UnboundedSender<PositionUpdate>,
    }

    impl CoalescingSync {
        /// Spawn the worker on `runtime`.
        ///
        /// The worker exits after draining once every `CoalescingSync` handle
        /// is dropped; the returned handle resolves at that point.
        pub fn spawn<T: Transport>(transport: T, policy: RetryPolicy, runtime: &Handle) -> (Self, JoinHandle<()>) {
            let (tx, rx) = mpsc::unbounded_channel();
            info!(attempts = policy.attempts(), base_ms = policy.base_ms, "coalescing sync worker configured");
            let worker = runtime.spawn(run(transport, policy, rx));
            (Self { tx }, worker)
        }
    }

    impl Dispatch for CoalescingSync {
        fn dispatch(&self, update: PositionUpdate) {
            if let Err(mpsc::error::SendError(update)) = self.tx.send(update) {
                warn!(id = %update.id, "sync worker stopped; dropping position update");
            }
        }
    }

    async fn run<T: Transport>(transport: T, policy: RetryPolicy, mut rx: mpsc::UnboundedReceiver<PositionUpdate>) {
        let mut pending = Pending::default();
        loop {
            if pending.is_empty() {
                match rx.recv().await {
                    Some(update) => {
                        pending.push(update);
                    }
                    None => break,
                }
            }
            // EDGE: everything that arrived during the previous request collapses here.
            while let Ok(update) = rx.try_recv() {
                pending.push(update);
            }
            if let Some(next) = pending.pop() {
                let result = deliver(&transport, &next, policy).await;
                report(&next.id, &result);
            }
        }
    }

    /// Send `update`, retrying retryable failures per `policy`.
    pub(crate) async fn deliver<T: Transport>(
        transport: &T,
        update: &PositionUpdate,
        policy: RetryPolicy,
    ) -> Result<(), SyncError> {
        let total = policy.attempts();
        let mut attempt = 1;
        loop {
            match transport.send(update).await {
                Ok(()) => return Ok(()),
                Err(e) if e.retryable() && attempt < total => {
                    warn!(id = %update.id, error = %e, attempt, total, "position sync failed; retrying");
                    tokio::time::sleep(policy.delay(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
