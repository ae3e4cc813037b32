//! Sync client: ships one element's geometry to the remote store.
//!
//! DESIGN
//! ======
//! Handlers hand a [`PositionUpdate`] to a [`Dispatch`] implementation and
//! return immediately. Dispatchers own the network I/O and run it off the
//! interaction path:
//!
//! - [`http::PerEventSync`] (native) and [`fetch::FetchSync`] (browser) send
//!   one request per update, exactly as the gesture produced them;
//! - [`queue::CoalescingSync`] (native) and [`fetch::FetchQueue`] (browser)
//!   collapse updates per element and retry transport failures.
//!
//! Wire format: POST `{ "<id>": { x, y, width, height } }` with a single key,
//! answered by `{ success: bool, error?: string }`.
//!
//! ERROR HANDLING
//! ==============
//! Every outcome ends in [`report`]. Failures are logged and dropped; the
//! element already shows its new geometry and is never rolled back.

#[cfg(feature = "web")]
pub mod fetch;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
pub mod queue;


use std::future::Future;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{error, info};

use crate::geom::Geometry;

// =============================================================================
// ERROR
// =============================================================================

/// Failures of a single position update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// A response arrived but its body was not a valid sync response.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The store answered `success: false`.
    #[error("store rejected update: {0}")]
    Rejected(String),
}

impl SyncError {
    /// Transport-level failures are worth another attempt; rejections are final.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Parse(_))
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// One element's geometry keyed by its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionUpdate {
    pub id: String,
    pub geometry: Geometry,
}

impl PositionUpdate {
    #[must_use]
    pub fn new(id: impl Into<String>, geometry: Geometry) -> Self {
        Self { id: id.into(), geometry }
    }
}

impl Serialize for PositionUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.id, &self.geometry)?;
        map.end()
    }
}

/// Response body returned by the store.
///
/// A missing `success` field counts as failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl SyncResponse {
    /// Turn the success flag into a result.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Rejected`] carrying the server message when `success` is false.
    pub fn into_result(self) -> Result<(), SyncError> {
        if self.success {
            Ok(())
        } else {
            Err(SyncError::Rejected(self.error.unwrap_or_else(|| "unspecified".to_owned())))
        }
    }
}

// =============================================================================
// SEAMS
// =============================================================================

/// Non-blocking hand-off of an update to the network layer.
pub trait Dispatch {
    /// Queue or start delivery of `update`; must not block.
    fn dispatch(&self, update: PositionUpdate);
}

/// A way to deliver one update and learn the store's answer.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, update: &PositionUpdate) -> impl Future<Output = Result<(), SyncError>> + Send;
}

/// Log the outcome of one delivery.
pub fn report(id: &str, result: &Result<(), SyncError>) {
    match result {
        Ok(()) => info!(id, "position synced"),
        Err(SyncError::Rejected(message)) => error!(id, error = %message, "store rejected position update"),
        Err(e) => error!(id, error = %e, "position sync failed"),
    }
}
