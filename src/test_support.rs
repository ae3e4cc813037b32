//! Test-only helpers shared across module tests.

use std::cell::RefCell;

use crate::sync::{Dispatch, PositionUpdate};

/// Dispatcher that records every update instead of sending it.
#[derive(Debug, Default)]
pub struct Recorder {
    updates: RefCell<Vec<PositionUpdate>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<PositionUpdate> {
        self.updates.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.updates.borrow().len()
    }

    pub fn last(&self) -> Option<PositionUpdate> {
        self.updates.borrow().last().cloned()
    }
}

impl Dispatch for Recorder {
    fn dispatch(&self, update: PositionUpdate) {
        self.updates.borrow_mut().push(update);
    }
}

/// Route `tracing` output to the test harness; safe to call repeatedly.
pub fn init_logging() {
    let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Another test already installed it.
    }
}
