//! Durable key-value state shared with the validation screen.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::WizardResult;
use async_trait::async_trait;

/// Set to "true" once a validation code has been sent.
pub const IS_PIN_SENT: &str = "isPinSent";

/// "<number>/<prefix>" of the number awaiting validation.
pub const PHONE_AND_CC: &str = "phoneAndCC";

/// String key-value store that survives restarts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> WizardResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> WizardResult<()>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> WizardResult<()>;
}
