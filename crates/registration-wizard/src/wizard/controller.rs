//! Screen controller for the phone registration flow.

use super::{Page, PhoneEntryState, WizardState};
use crate::auth::AuthClient;
use crate::config::WizardConfig;
use crate::country::{detect_mcc, list_countries, Country, CountryDirectory, CountryOption, NetworkSource};
use crate::error::{WizardError, WizardResult};
use crate::l10n::{interpolate, Catalog};
use crate::notice::Notice;
use crate::phone::{PhoneNumberParser, PhoneParts};
use crate::store::{KeyValueStore, IS_PIN_SENT, PHONE_AND_CC};
use crate::ui::{Presenter, Route, Router};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// External services the wizard talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub countries: Arc<dyn CountryDirectory>,
    pub parser: Arc<dyn PhoneNumberParser>,
    pub auth: Arc<dyn AuthClient>,
    pub presenter: Arc<dyn Presenter>,
    pub router: Arc<dyn Router>,
    pub store: Arc<dyn KeyValueStore>,
}

/// Drives country selection, number validation and registration.
pub struct RegistrationWizard {
    services: Collaborators,
    settings: WizardConfig,
    catalog: Catalog,
    detected_mcc: Option<u16>,
    entry: PhoneEntryState,
    state: WizardState,
    in_flight: Arc<AtomicBool>,
}

impl RegistrationWizard {
    /// Create a wizard, detecting the country from the device networks.
    pub fn new(services: Collaborators, settings: WizardConfig, networks: &dyn NetworkSource) -> Self {
        let detected_mcc = detect_mcc(&networks.registrations());
        match detected_mcc {
            Some(mcc) => info!(mcc, "Mobile country code detected"),
            None => info!("No mobile network available, country not detected"),
        }

        Self {
            services,
            settings,
            catalog: Catalog::default(),
            detected_mcc,
            entry: PhoneEntryState::default(),
            state: WizardState::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use a different message catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn detected_mcc(&self) -> Option<u16> {
        self.detected_mcc
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn entry(&self) -> &PhoneEntryState {
        &self.entry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the client must be updated before it can register.
    pub fn is_outdated(&self) -> bool {
        self.settings.update_needed
    }

    /// Whether a registration request is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Message telling the user which country was detected, if any.
    pub fn detection_message(&self) -> String {
        let detected = self
            .detected_mcc
            .and_then(|mcc| self.services.countries.find_by_mcc(mcc));

        match detected {
            Some(country) => interpolate(
                &self.catalog.country_detected_on_login,
                &[("country", country.name.as_str())],
            ),
            None => self.catalog.country_not_detected_on_login.clone(),
        }
    }

    /// Country picker entries, one per region code.
    pub fn list_countries(&self) -> impl Iterator<Item = CountryOption<'_>> {
        list_countries(self.services.countries.as_ref(), self.detected_mcc)
    }

    /// Country the picker starts on: the last entry matching the detected code.
    pub fn initial_selection(&self) -> Option<&Country> {
        self.list_countries()
            .filter(|o| o.selected)
            .last()
            .map(|o| o.country)
    }

    /// Render the entry screen.
    pub fn render(&mut self) {
        if self.settings.update_needed {
            warn!("Client version is outdated, update needed");
            self.services
                .presenter
                .show_update_needed(&self.catalog.update_needed);
            return;
        }

        let message = self.detection_message();
        let options: Vec<CountryOption<'_>> = self.list_countries().collect();
        self.services.presenter.show_entry(&message, &options);

        let initial = self
            .initial_selection()
            .map(|c| (c.code.clone(), c.prefix.clone()));
        if let Some((code, prefix)) = initial {
            self.services.presenter.show_prefix(&prefix);
            self.entry.selected_country_code = Some(code);
        }

        self.services.presenter.show_page(&Page::Init);
    }

    /// Select a country and return its dialing prefix.
    pub fn select_country(&mut self, code: &str) -> WizardResult<String> {
        let country = self
            .services
            .countries
            .find_by_code(code)
            .ok_or_else(|| WizardError::CountryNotFound(code.to_string()))?;
        let prefix = country.prefix.clone();
        let code = country.code.clone();

        debug!(country = %code, prefix = %prefix, "Country selected");
        self.services.presenter.show_prefix(&prefix);
        self.entry.selected_country_code = Some(code);
        Ok(prefix)
    }

    /// Validate the entered number and move to the confirmation screen.
    ///
    /// Returns `Ok(false)` when the number was not accepted and the user
    /// declined to continue with it.
    pub fn goto_confirmation(&mut self, raw_number: &str) -> WizardResult<bool> {
        let code = self.require_selection()?;
        let parts = self.phone_parts(&code, raw_number)?;
        self.entry.raw_number = raw_number.to_string();

        if !self.check_phone_number(&parts, &code) {
            debug!(country = %code, "Number rejected by the user");
            return Ok(false);
        }

        self.services.presenter.fill_confirmation_number(&parts.number);
        self.entry.normalized_prefix = parts.prefix;
        self.entry.normalized_number = parts.number;
        self.advance(Page::Confirmation);
        Ok(true)
    }

    /// Check a number against the selected region.
    ///
    /// A number that does not parse, or parses to another region, is shown to
    /// the user who may accept it anyway.
    pub fn check_phone_number(&self, parts: &PhoneParts, country_code: &str) -> bool {
        let region = country_code.to_ascii_uppercase();
        let parsed = self.services.parser.parse(&parts.complete(), &region);

        match parsed {
            Some(number) if number.region.to_ascii_uppercase() == region => true,
            other => {
                debug!(
                    selected = %region,
                    parsed = ?other.map(|n| n.region),
                    "Number does not match the selected country"
                );
                let country_name = self
                    .services
                    .countries
                    .find_by_code(country_code)
                    .map(|c| c.name.as_str())
                    .unwrap_or(country_code);
                let message = interpolate(
                    &self.catalog.movil_number_validation_alert,
                    &[
                        ("country", country_name),
                        ("number", parts.number.as_str()),
                        ("prefix", parts.prefix.as_str()),
                    ],
                );
                self.services.presenter.confirm(&message)
            }
        }
    }

    /// Move forward to `page`.
    pub fn advance(&mut self, page: Page) {
        self.services.presenter.show_page(&page);
        self.state.advance(page);
    }

    /// Move back one page. Does nothing on the first page.
    pub fn retreat(&mut self) -> Option<&Page> {
        let page = self.state.retreat()?.clone();
        self.services.presenter.show_page(&page);
        Some(self.state.current())
    }

    /// Skip straight to code entry for a user that already holds a code.
    pub fn goto_validate(&self, number: &str) -> WizardResult<Route> {
        let code = self.require_selection()?;
        let parts = self.phone_parts(&code, number)?;
        let route = Route::Validate {
            number: parts.digits(),
            prefix: parts.prefix,
        };

        self.services.router.navigate(&route.path(), true);
        Ok(route)
    }

    /// Register the confirmed number and navigate to where the user goes next.
    ///
    /// Fails with `SubmissionInFlight` while a previous call is outstanding.
    #[instrument(skip(self))]
    pub async fn register(&self, confirmed_number: &str) -> WizardResult<Route> {
        let code = self.require_selection()?;
        let parts = self.phone_parts(&code, confirmed_number)?;
        let number = parts.digits();

        let busy = BusyGuard::acquire(&self.in_flight, &self.services.presenter)?;
        self.services.presenter.set_intro_visible(false);

        let result = self.submit(&parts.prefix, &number).await;
        drop(busy);

        match result {
            Ok(route) => {
                info!(route = %route, "Registration complete");
                self.services.router.navigate(&route.path(), true);
                Ok(route)
            }
            Err(err) => {
                warn!(error = %err, "Registration failed");
                self.present_error(&err);
                Err(err)
            }
        }
    }

    /// Open the terms of use.
    pub fn show_terms(&self) {
        self.services
            .presenter
            .open_external(&self.settings.terms_url, &self.catalog.terms_of_use);
    }

    async fn submit(&self, prefix: &str, number: &str) -> WizardResult<Route> {
        let store = &self.services.store;
        store.remove(IS_PIN_SENT).await?;

        let needs_validation = self
            .services
            .auth
            .register(prefix, number, &self.settings.locale)
            .await?;

        if needs_validation {
            // Code already sent, route on even if the flags are lost
            if let Err(err) = self.remember_pin_sent(prefix, number).await {
                warn!(error = %err, "Failed to persist validation state");
            }
            return Ok(Route::Validate {
                number: number.to_string(),
                prefix: prefix.to_string(),
            });
        }

        match self.services.auth.screen_name().await {
            Some(_) => Ok(Route::Inbox),
            None => Ok(Route::Profile),
        }
    }

    async fn remember_pin_sent(&self, prefix: &str, number: &str) -> WizardResult<()> {
        let store = &self.services.store;
        store.set(IS_PIN_SENT, "true").await?;
        store
            .set(PHONE_AND_CC, &format!("{}/{}", number, prefix))
            .await
    }

    fn present_error(&self, err: &WizardError) {
        self.services.presenter.set_intro_visible(true);
        let notice = match err {
            WizardError::Registration(e) => Notice::from(e),
            _ => Notice::Unknown,
        };
        self.services
            .presenter
            .notify(&notice.message(&self.catalog));
    }

    /// The selected country code, telling the user to pick one if missing.
    fn require_selection(&self) -> WizardResult<String> {
        match &self.entry.selected_country_code {
            Some(code) => Ok(code.clone()),
            None => {
                self.services
                    .presenter
                    .notify(&self.catalog.select_country_alert);
                Err(WizardError::MissingCountrySelection)
            }
        }
    }

    fn phone_parts(&self, code: &str, number: &str) -> WizardResult<PhoneParts> {
        let country = self
            .services
            .countries
            .find_by_code(code)
            .ok_or_else(|| WizardError::CountryNotFound(code.to_string()))?;
        Ok(PhoneParts::new(country, number))
    }
}

/// Busy state for one registration request, released on drop.
struct BusyGuard {
    flag: Arc<AtomicBool>,
    presenter: Arc<dyn Presenter>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>, presenter: &Arc<dyn Presenter>) -> WizardResult<Self> {
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WizardError::SubmissionInFlight);
        }

        presenter.set_busy(true);
        Ok(Self {
            flag: Arc::clone(flag),
            presenter: Arc::clone(presenter),
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.presenter.set_busy(false);
        self.flag.store(false, Ordering::Release);
    }
}
