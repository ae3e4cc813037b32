//! Native HTTP transport (`reqwest` on `tokio`).
//!
//! The endpoint must be an absolute URL here; relative paths such as the
//! default `/update_button_positions` only make sense inside a page and are
//! rejected when the transport is built.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use tokio::runtime::Handle;

use super::queue::CoalescingSync;
use super::{Dispatch, PositionUpdate, SyncError, SyncResponse, Transport, report};
use crate::config::{ConfigError, SyncConfig, SyncMode};

/// POSTs one update per call and reads the store's verdict.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if `endpoint` is not an absolute
    /// URL, or [`ConfigError::HttpClient`] if the client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = reqwest::Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, update: &PositionUpdate) -> Result<(), SyncError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(update)
            .send()
            .await
            .map_err(|e| SyncError::Request(e.to_string()))?;

        // The store answers rejections with 4xx and a JSON body, so the
        // status alone decides nothing.
        let status = response.status();
        let body: SyncResponse = response
            .json()
            .await
            .map_err(|e| SyncError::Parse(format!("status {status}: {e}")))?;
        body.into_result()
    }
}

/// Fire-and-forget dispatcher: one spawned request per update, no retry.
pub struct PerEventSync<T> {
    transport: Arc<T>,
    runtime: Handle,
}

impl<T: Transport> PerEventSync<T> {
    #[must_use]
    pub fn new(transport: T, runtime: Handle) -> Self {
        Self { transport: Arc::new(transport), runtime }
    }
}

impl<T: Transport> Dispatch for PerEventSync<T> {
    fn dispatch(&self, update: PositionUpdate) {
        let transport = Arc::clone(&self.transport);
        self.runtime.spawn(async move {
            let result = transport.send(&update).await;
            report(&update.id, &result);
        });
    }
}

/// The native dispatcher selected by [`SyncConfig::mode`].
pub enum HttpSync {
    PerEvent(PerEventSync<HttpTransport>),
    Coalesced(CoalescingSync),
}

impl HttpSync {
    /// Build the dispatcher for `config`, spawning onto `runtime`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the endpoint or HTTP client is unusable.
    pub fn from_config(config: &SyncConfig, runtime: &Handle) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(&config.endpoint)?;
        Ok(match config.mode {
            SyncMode::PerEvent => Self::PerEvent(PerEventSync::new(transport, runtime.clone())),
            SyncMode::Coalesced => {
                let (sync, _worker) = CoalescingSync::spawn(transport, config.retry_policy(), runtime);
                Self::Coalesced(sync)
            }
        })
    }
}

impl Dispatch for HttpSync {
    fn dispatch(&self, update: PositionUpdate) {
        match self {
            Self::PerEvent(sync) => sync.dispatch(update),
            Self::Coalesced(sync) => sync.dispatch(update),
        }
    }
}
