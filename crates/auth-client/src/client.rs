//! Registration HTTP client.

use crate::error::AuthError;
use crate::types::*;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Client for the account registration endpoint.
///
/// Remembers the screen name reported by the last successful registration so
/// callers can decide where to send the user next.
#[derive(Clone)]
pub struct AuthApiClient {
    client: Client,
    base_url: String,
    screen_name: Arc<RwLock<Option<String>>>,
}

impl AuthApiClient {
    /// Create a new registration client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            screen_name: Arc::new(RwLock::new(None)),
        })
    }

    /// Check if the registration API is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Register a phone number.
    ///
    /// Returns `true` when the server sent a validation code that the user
    /// must enter before the account can be used.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        prefix: &str,
        number: &str,
        locale: &str,
    ) -> Result<bool, AuthError> {
        let request = RegisterRequest {
            prefix: prefix.to_string(),
            msisdn: number.to_string(),
            locale: locale.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/register", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Registration failed");
            return Err(classify_error(status, &body));
        }

        let registered: RegisterResponse = response.json().await?;
        debug!(
            needs_validation = registered.needs_validation,
            "Registration accepted"
        );

        *self.screen_name.write().await = registered.screen_name;
        Ok(registered.needs_validation)
    }

    /// Screen name of the registered account, if the server reported one.
    pub async fn screen_name(&self) -> Option<String> {
        self.screen_name.read().await.clone()
    }
}

/// Map a non-success response onto the error taxonomy.
fn classify_error(status: StatusCode, body: &str) -> AuthError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return AuthError::RateLimited;
    }

    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) if err.error == TOO_RECENT => AuthError::TooRecent {
            retry_after_secs: err.retry_after_secs().unwrap_or(0),
        },
        Ok(err) => AuthError::Api {
            message: err.message.unwrap_or_else(|| status.to_string()),
            code: err.error,
        },
        Err(_) => AuthError::Unexpected(format!("{} - {}", status, body)),
    }
}
