//! Mapping of registration failures to user-facing notices.

use crate::l10n::{interpolate, Catalog};
use auth_client::AuthError;

/// What the user is told after a failed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A code was sent recently; retry after this many minutes
    TooRecent { minutes: u64 },
    /// The server returned a structured error
    Structured,
    /// HTTP 429
    RateLimited,
    /// Anything else
    Unknown,
}

impl Notice {
    /// Localized message for this notice.
    pub fn message(&self, catalog: &Catalog) -> String {
        match self {
            Notice::TooRecent { minutes } => interpolate(
                &catalog.register_error_too_recent,
                &[("minutes", minutes.to_string().as_str())],
            ),
            Notice::RateLimited => catalog.register_error_429_alert.clone(),
            Notice::Structured | Notice::Unknown => catalog.register_error_object_alert.clone(),
        }
    }
}

impl From<&AuthError> for Notice {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::TooRecent { retry_after_secs } => Notice::TooRecent {
                minutes: wait_minutes(*retry_after_secs),
            },
            AuthError::Api { .. } => Notice::Structured,
            AuthError::RateLimited => Notice::RateLimited,
            AuthError::Http(_) | AuthError::Json(_) | AuthError::Unexpected(_) => Notice::Unknown,
        }
    }
}

/// Whole minutes to wait, rounded up.
pub fn wait_minutes(seconds: u64) -> u64 {
    seconds.div_ceil(60)
}
