//! Web Client Error Types

use thiserror::Error;

/// Session persistence errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// The stored user entry is not valid JSON for a [`SessionUser`](crate::session::SessionUser)
    #[error("Stored user is corrupt: {0}")]
    CorruptUser(#[source] serde_json::Error),

    #[error("Failed to serialize user: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Why a plain `GET` against the API failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request failed with status code {0}")]
    Status(u16),

    /// Transport failure or an unreadable body
    #[error("{0}")]
    Network(String),
}

/// Client setup errors
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
