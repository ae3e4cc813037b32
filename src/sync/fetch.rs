//! Browser transport (`gloo-net` fetch on the page's event loop).
//!
//! Requests are spawned with `spawn_local`, so a handler returns before the
//! request even starts; outcomes are reported whenever the response lands.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::Request;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

use super::queue::{Pending, RetryPolicy};
use super::{Dispatch, PositionUpdate, SyncError, SyncResponse, report};
use crate::config::{SyncConfig, SyncMode};

/// POST one update and read the store's verdict.
async fn post_update(endpoint: &str, update: &PositionUpdate) -> Result<(), SyncError> {
    let request = Request::post(endpoint)
        .json(update)
        .map_err(|e| SyncError::Request(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| SyncError::Request(e.to_string()))?;
    let status = response.status();
    let body: SyncResponse = response
        .json()
        .await
        .map_err(|e| SyncError::Parse(format!("status {status}: {e}")))?;
    body.into_result()
}

async fn deliver(endpoint: &str, update: &PositionUpdate, policy: RetryPolicy) -> Result<(), SyncError> {
    let total = policy.attempts();
    let mut attempt = 1;
    loop {
        match post_update(endpoint, update).await {
            Ok(()) => return Ok(()),
            Err(e) if e.retryable() && attempt < total => {
                warn!(id = %update.id, error = %e, attempt, total, "position sync failed; retrying");
                gloo_timers::future::sleep(policy.delay(attempt)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// One fetch per update, no retry.
pub struct FetchSync {
    endpoint: Rc<str>,
}

impl FetchSync {
    #[must_use]
    pub fn new(endpoint: &str) -> Self {
        Self { endpoint: Rc::from(endpoint) }
    }
}

impl Dispatch for FetchSync {
    fn dispatch(&self, update: PositionUpdate) {
        let endpoint = Rc::clone(&self.endpoint);
        spawn_local(async move {
            let result = post_update(&endpoint, &update).await;
            report(&update.id, &result);
        });
    }
}

#[derive(Default)]
struct QueueState {
    pending: Pending,
    draining: bool,
}

/// Coalescing queue drained by at most one local task at a time.
pub struct FetchQueue {
    state: Rc<RefCell<QueueState>>,
    endpoint: Rc<str>,
    policy: RetryPolicy,
}

impl FetchQueue {
    #[must_use]
    pub fn new(endpoint: &str, policy: RetryPolicy) -> Self {
        Self { state: Rc::default(), endpoint: Rc::from(endpoint), policy }
    }
}

impl Dispatch for FetchQueue {
    fn dispatch(&self, update: PositionUpdate) {
        {
            let mut state = self.state.borrow_mut();
            state.pending.push(update);
            if state.draining {
                return;
            }
            state.draining = true;
        }
        spawn_local(drain(Rc::clone(&self.state), Rc::clone(&self.endpoint), self.policy));
    }
}

async fn drain(state: Rc<RefCell<QueueState>>, endpoint: Rc<str>, policy: RetryPolicy) {
    loop {
        let next = {
            let mut state = state.borrow_mut();
            match state.pending.pop() {
                Some(update) => update,
                None => {
                    state.draining = false;
                    return;
                }
            }
        };
        let result = deliver(&endpoint, &next, policy).await;
        report(&next.id, &result);
    }
}

/// The browser dispatcher selected by [`SyncConfig::mode`].
pub enum WebSync {
    PerEvent(FetchSync),
    Coalesced(FetchQueue),
}

impl WebSync {
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        match config.mode {
            SyncMode::PerEvent => Self::PerEvent(FetchSync::new(&config.endpoint)),
            SyncMode::Coalesced => Self::Coalesced(FetchQueue::new(&config.endpoint, config.retry_policy())),
        }
    }
}

impl Dispatch for WebSync {
    fn dispatch(&self, update: PositionUpdate) {
        match self {
            Self::PerEvent(sync) => sync.dispatch(update),
            Self::Coalesced(sync) => sync.dispatch(update),
        }
    }
}
