//! Registration Wizard - phone-number sign-up flow for a mobile messaging client.
//!
//! The wizard:
//! - Detects the user's country from the device's mobile networks
//! - Validates the entered number against the selected country's numbering plan
//! - Registers the number and routes the user to code validation, profile or inbox

pub mod auth;
pub mod config;
pub mod country;
pub mod error;
pub mod l10n;
pub mod notice;
pub mod phone;
pub mod store;
pub mod terminal;
pub mod ui;
pub mod wizard;

pub use auth::AuthClient;
pub use config::Config;
pub use country::{Country, CountryDirectory, CountryOption, CountryTable};
pub use error::{WizardError, WizardResult};
pub use phone::{ParsedNumber, PhoneNumberParser, PhoneParts, RegionGrammar};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use ui::{Presenter, Route, Router};
pub use wizard::{Collaborators, Page, RegistrationWizard, WizardState};
