//! Registration client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server refused a new code because one was sent recently.
    #[error("Registration requested too recently, retry in {retry_after_secs}s")]
    TooRecent { retry_after_secs: u64 },

    #[error("Rate limit exceeded")]
    RateLimited,

    /// Any other structured error body returned by the server.
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("Unexpected response: {0}")]
    Unexpected(String),
}
