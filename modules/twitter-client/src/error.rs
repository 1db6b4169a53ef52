use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TwitterError>;

#[derive(Debug, Error)]
pub enum TwitterError {
    /// The API reported the rate limit exceeded; `reset` is how long the
    /// provider says to wait before the window reopens.
    #[error("Rate limited, reset in {reset:?}")]
    RateLimited { reset: Duration },

    /// The requested account no longer resolves (deleted, suspended,
    /// protected). Expansion for that account should stop silently.
    #[error("Account not found")]
    NotFound,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TwitterError {
    fn from(err: reqwest::Error) -> Self {
        TwitterError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TwitterError {
    fn from(err: serde_json::Error) -> Self {
        TwitterError::Parse(err.to_string())
    }
}
