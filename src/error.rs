//! Processing errors.
//!
//! Local validation failures (`InvalidUrl`, `InvalidJson`, `MissingBody`) are
//! raised before any network I/O. `Transport` wraps every failure of the
//! exchange itself. A non-success HTTP status is not an error; it is a normal
//! `Failure` routing outcome.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// The resolved URL template is not an absolute http(s) URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The resolved body is not parseable JSON text.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// No body template was configured, or it resolved to blank text.
    #[error("Request body is missing or empty")]
    MissingBody,

    /// Connection, TLS or stream failure during the exchange.
    #[error("HTTP transport failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl ProcessError {
    /// True when the error happened before any network I/O was attempted.
    pub fn is_local(&self) -> bool {
        !matches!(self, ProcessError::Transport(_))
    }
}
