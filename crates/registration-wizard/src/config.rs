//! Configuration for the registration wizard.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Wizard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Registration API configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Key-value persistence configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Device network metadata
    #[serde(default)]
    pub device: DeviceConfig,

    /// Wizard behaviour
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Registration API base URL
    #[serde(default = "default_auth_api_url")]
    pub api_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the JSON key-value file
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, values are kept in memory only)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DeviceConfig {
    /// Comma-separated network codes reported by the device, e.g. "214-07,208-01"
    #[serde(default)]
    pub networks: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// Locale tag sent with the registration request
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Show the update-needed screen instead of the wizard
    #[serde(default)]
    pub update_needed: bool,

    /// Terms of use page
    #[serde(default = "default_terms_url")]
    pub terms_url: String,

    /// Optional JSON file overriding the built-in message catalog
    #[serde(default)]
    pub messages_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_url: default_auth_api_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            persist: true,
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            update_needed: false,
            terms_url: default_terms_url(),
            messages_path: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_auth_api_url() -> String {
    "http://localhost:8080".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/wizard-state.json")
}

fn default_true() -> bool {
    true
}

fn default_locale() -> String {
    "es-ES".into()
}

fn default_terms_url() -> String {
    "https://example.com/terms".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
