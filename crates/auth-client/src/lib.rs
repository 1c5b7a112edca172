//! HTTP client for the phone-number registration endpoint.

mod client;
mod error;
mod types;

pub use client::AuthApiClient;
pub use error::AuthError;
pub use types::*;
