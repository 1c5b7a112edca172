//! Registration call seam.

use async_trait::async_trait;
use auth_client::{AuthApiClient, AuthError};

/// Remote account registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Register `number` under dialing `prefix` (both digits only).
    ///
    /// Returns whether a validation code was sent.
    async fn register(&self, prefix: &str, number: &str, locale: &str) -> Result<bool, AuthError>;

    /// Display name of the account, if it already has one.
    async fn screen_name(&self) -> Option<String>;
}

#[async_trait]
impl AuthClient for AuthApiClient {
    async fn register(&self, prefix: &str, number: &str, locale: &str) -> Result<bool, AuthError> {
        AuthApiClient::register(self, prefix, number, locale).await
    }

    async fn screen_name(&self) -> Option<String> {
        AuthApiClient::screen_name(self).await
    }
}
