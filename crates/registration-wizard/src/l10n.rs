//! User-facing message templates.

use crate::error::{WizardError, WizardResult};
use serde::Deserialize;
use std::path::Path;

/// Message templates used by the wizard. Placeholders are written `{name}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Catalog {
    pub country_detected_on_login: String,
    pub country_not_detected_on_login: String,
    pub select_country_alert: String,
    pub movil_number_validation_alert: String,
    pub register_error_too_recent: String,
    pub register_error_object_alert: String,
    #[serde(rename = "registerError429Alert")]
    pub register_error_429_alert: String,
    pub terms_of_use: String,
    pub update_needed: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            country_detected_on_login: "We detected you are in {country}.".into(),
            country_not_detected_on_login: "We could not detect your country.".into(),
            select_country_alert: "Please select a country.".into(),
            movil_number_validation_alert:
                "+{prefix} {number} does not look like a valid number for {country}. Continue anyway?"
                    .into(),
            register_error_too_recent:
                "A code was sent recently. Please try again in {minutes} minutes.".into(),
            register_error_object_alert: "Registration failed. Please try again later.".into(),
            register_error_429_alert: "Too many attempts. Please wait before trying again.".into(),
            terms_of_use: "Terms of use".into(),
            update_needed: "This version is no longer supported. Please update the app.".into(),
        }
    }
}

impl Catalog {
    /// Load a catalog from a JSON file. Missing keys keep their defaults.
    pub async fn load(path: &Path) -> WizardResult<Self> {
        let data = tokio::fs::read(path).await?;
        serde_json::from_slice(&data)
            .map_err(|e| WizardError::ReferenceData(format!("message catalog: {}", e)))
    }
}

/// Replace each `{key}` in `template` with its value. Unknown placeholders stay as they are.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{}}}", key), value)
    })
}
