/*
[INPUT]:  Error sources (HTTP transport, API rejections, config, storage)
[OUTPUT]: Structured error types with failover classification
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the panda account adapter
#[derive(Error, Debug)]
pub enum PandaError {
    /// HTTP transport failed (includes the no-response case)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status; surfaced verbatim, never failed over
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Remote domain config unreachable or malformed
    #[error("Failed to fetch domain config: {0}")]
    ConfigFetch(String),

    /// Domain config fetched but contains zero candidates
    #[error("Domain config is empty")]
    EmptyConfig,

    /// Persisted client state could not be read or written
    #[error("State storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A stored credential cannot be used as-is
    #[error("Stored credential is invalid: {0}")]
    InvalidCredential(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PandaError {
    /// True when the request never produced an HTTP response (connect error,
    /// timeout, DNS failure). Only these failures trigger the one-shot
    /// endpoint failover in login/signup; a server-returned error status does
    /// not, and neither does a body that fails to decode — a response was
    /// received, even though reqwest reports no status for decode errors.
    pub fn is_connection_failure(&self) -> bool {
        match self {
            PandaError::Http(err) => err.status().is_none() && !err.is_decode(),
            _ => false,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        PandaError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, PandaError>;
