//! Registration config: which elements to track and where updates go.
//!
//! Built three ways: [`SyncConfig::default`] (the zero-argument bootstrap),
//! [`SyncConfig::from_env`] for native hosts, and [`SyncConfig::from_json`]
//! for config objects handed over from JavaScript. Missing fields always fall
//! back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::Deserialize;

use crate::consts::{DEFAULT_EDGE_MARGIN_PX, DEFAULT_ENDPOINT, DEFAULT_RETRIES, DEFAULT_RETRY_BASE_MS, DEFAULT_SELECTOR};
use crate::gesture::Edges;
use crate::sync::queue::RetryPolicy;

/// Errors produced while building a config or the transport it names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A config value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),

    /// The endpoint is not usable by the transport.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClient(String),
}

/// How updates are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// One request per move/resize event, no retry.
    #[default]
    PerEvent,
    /// Latest value per element, one request at a time, bounded retry.
    Coalesced,
}

impl FromStr for SyncMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "per_event" => Ok(Self::PerEvent),
            "coalesced" => Ok(Self::Coalesced),
            other => Err(ConfigError::Parse(format!(
                "unknown sync mode '{other}' (expected 'per_event' or 'coalesced')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Selector naming the trackable elements.
    pub selector: String,
    /// Where updates are POSTed.
    pub endpoint: String,
    /// Pointer distance from an edge that starts a resize, in pixels.
    pub edge_margin: f64,
    /// Edges that may be resized.
    pub edges: Edges,
    pub mode: SyncMode,
    /// Delivery attempts per update (coalesced mode only).
    pub retries: usize,
    /// Linear back-off step between attempts, in milliseconds.
    pub retry_base_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            edge_margin: DEFAULT_EDGE_MARGIN_PX,
            edges: Edges::ALL,
            mode: SyncMode::PerEvent,
            retries: DEFAULT_RETRIES,
            retry_base_ms: DEFAULT_RETRY_BASE_MS,
        }
    }
}

impl SyncConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `DRAGSYNC_SELECTOR`: default `.draggable-button`
    /// - `DRAGSYNC_ENDPOINT`: default `/update_button_positions`
    /// - `DRAGSYNC_EDGE_MARGIN`: default 8
    /// - `DRAGSYNC_MODE`: `per_event` (default) or `coalesced`
    /// - `DRAGSYNC_RETRIES`: default 3
    /// - `DRAGSYNC_RETRY_BASE_MS`: default 50
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for an unknown `DRAGSYNC_MODE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode = match env_var("DRAGSYNC_MODE") {
            Some(raw) => raw.parse()?,
            None => SyncMode::default(),
        };
        Ok(Self {
            selector: env_var("DRAGSYNC_SELECTOR").unwrap_or_else(|| DEFAULT_SELECTOR.to_owned()),
            endpoint: env_var("DRAGSYNC_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
            edge_margin: env_parse("DRAGSYNC_EDGE_MARGIN", DEFAULT_EDGE_MARGIN_PX),
            edges: Edges::ALL,
            mode,
            retries: env_parse("DRAGSYNC_RETRIES", DEFAULT_RETRIES),
            retry_base_ms: env_parse("DRAGSYNC_RETRY_BASE_MS", DEFAULT_RETRY_BASE_MS),
        })
    }

    /// Parse a JSON config object; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `raw` is not a valid config object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy { attempts: self.retries, base_ms: self.retry_base_ms }
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env_var(key).map(|v| v.parse::<T>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}
