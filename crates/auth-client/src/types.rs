//! Registration API wire types.

use serde::{Deserialize, Serialize};

/// Error code the server uses when a code was sent too recently.
pub const TOO_RECENT: &str = "too_recent";

/// Body of `POST /v1/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Dialing prefix, digits only (e.g. "34").
    pub prefix: String,
    /// Subscriber number, digits only.
    pub msisdn: String,
    /// Locale tag used for the SMS text (e.g. "es-ES").
    pub locale: String,
}

/// Successful registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    /// Whether the server sent a validation code that must be entered next.
    #[serde(default)]
    pub needs_validation: bool,
    /// Display name already attached to the account, if any.
    #[serde(default)]
    pub screen_name: Option<String>,
}

/// Structured error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Seconds to wait before retrying, when the server reports one.
    ///
    /// Accepts whole or fractional seconds, as a number or a numeric string.
    /// Fractions round up.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self.data.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(ceil_secs)),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok().and_then(ceil_secs),
            _ => None,
        }
    }
}

fn ceil_secs(secs: f64) -> Option<u64> {
    (secs.is_finite() && secs >= 0.0).then(|| secs.ceil() as u64)
}
