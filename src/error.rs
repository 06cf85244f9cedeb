//! Error taxonomy for a synchronisation run.
//!
//! - [`ConfigError`]: anything that stops the run before the first request.
//! - [`FetchError`]: a source could not be retrieved; the entry is skipped.
//! - [`PublishError`]: Outline rejected or never answered the update; the run stops.

use std::path::PathBuf;
use thiserror::Error;

/// Startup failures. Every variant is fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No Outline API key: set `outline_api` in the config file or OUTLINE_API_KEY in the environment")]
    MissingCredential,

    #[error("Invalid {field} URL in entry {index} ({value}): {reason}")]
    InvalidUrl {
        index: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// A source that could not be turned into document text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("source returned HTTP {0}")]
    Status(u16),

    #[error("request to source failed: {0}")]
    Transport(String),

    #[error("source body could not be read as text: {0}")]
    Body(String),
}

/// A document update that did not go through.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Outline answered with a non-200 `status` in the response body.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("request to Outline failed: {0}")]
    Transport(String),

    #[error("unexpected response from Outline (HTTP {http_status}): {reason}")]
    Decode { http_status: u16, reason: String },
}

impl PublishError {
    /// Status code to report alongside the message, when one is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            PublishError::Api { status, .. } => Some(*status),
            PublishError::Decode { http_status, .. } => Some(*http_status),
            PublishError::Transport(_) => None,
        }
    }
}
