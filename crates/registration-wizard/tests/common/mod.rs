//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use auth_client::AuthError;
use registration_wizard::{
    config::WizardConfig,
    country::{NetworkRegistration, StaticNetworks},
    AuthClient, Collaborators, CountryOption, CountryTable, MemoryStore, Page, ParsedNumber,
    PhoneNumberParser, Presenter, RegionGrammar, RegistrationWizard, Router,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Outcome the fake server returns.
#[derive(Clone)]
pub enum FakeOutcome {
    NeedsValidation(bool),
    TooRecent(u64),
    Structured,
    RateLimited,
    Unexpected,
}

/// Registration client answering with a canned outcome.
pub struct FakeAuth {
    pub outcome: FakeOutcome,
    pub screen_name: Option<String>,
    pub delay: Duration,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeAuth {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            screen_name: None,
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_screen_name(mut self, name: &str) -> Self {
        self.screen_name = Some(name.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthClient for FakeAuth {
    async fn register(&self, prefix: &str, number: &str, locale: &str) -> Result<bool, AuthError> {
        self.calls
            .lock()
            .unwrap()
            .push((prefix.to_string(), number.to_string(), locale.to_string()));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.outcome {
            FakeOutcome::NeedsValidation(needs) => Ok(*needs),
            FakeOutcome::TooRecent(secs) => Err(AuthError::TooRecent {
                retry_after_secs: *secs,
            }),
            FakeOutcome::Structured => Err(AuthError::Api {
                code: "invalid_msisdn".into(),
                message: "rejected".into(),
            }),
            FakeOutcome::RateLimited => Err(AuthError::RateLimited),
            FakeOutcome::Unexpected => Err(AuthError::Unexpected("502 - bad gateway".into())),
        }
    }

    async fn screen_name(&self) -> Option<String> {
        self.screen_name.clone()
    }
}

/// Parser that always reports the same region, or fails.
pub struct StubParser(pub Option<&'static str>);

impl PhoneNumberParser for StubParser {
    fn parse(&self, number: &str, _region_hint: &str) -> Option<ParsedNumber> {
        self.0.map(|region| ParsedNumber {
            region: region.to_string(),
            national_number: number.to_string(),
            international: format!("+{}", number),
        })
    }
}

/// Presenter that records every call.
#[derive(Default)]
pub struct RecordingPresenter {
    pub accept: bool,
    pub prompts: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<String>>,
    pub pages: Mutex<Vec<String>>,
    pub prefixes: Mutex<Vec<String>>,
    pub filled: Mutex<Vec<String>>,
    pub busy: Mutex<Vec<bool>>,
    pub intro: Mutex<Vec<bool>>,
    pub entries: Mutex<Vec<(String, Vec<(String, bool)>)>>,
}

impl RecordingPresenter {
    pub fn accepting(accept: bool) -> Self {
        Self {
            accept,
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn busy(&self) -> Vec<bool> {
        self.busy.lock().unwrap().clone()
    }

    pub fn intro(&self) -> Vec<bool> {
        self.intro.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn show_update_needed(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn show_entry(&self, detection_message: &str, countries: &[CountryOption<'_>]) {
        let options = countries
            .iter()
            .map(|o| (o.country.code.clone(), o.selected))
            .collect();
        self.entries
            .lock()
            .unwrap()
            .push((detection_message.to_string(), options));
    }

    fn show_page(&self, page: &Page) {
        self.pages.lock().unwrap().push(page.to_string());
    }

    fn show_prefix(&self, prefix: &str) {
        self.prefixes.lock().unwrap().push(prefix.to_string());
    }

    fn fill_confirmation_number(&self, number: &str) {
        self.filled.lock().unwrap().push(number.to_string());
    }

    fn set_intro_visible(&self, visible: bool) {
        self.intro.lock().unwrap().push(visible);
    }

    fn set_busy(&self, busy: bool) {
        self.busy.lock().unwrap().push(busy);
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.accept
    }

    fn open_external(&self, _url: &str, _title: &str) {}
}

/// Router that records navigation.
#[derive(Default)]
pub struct RecordingRouter {
    pub paths: Mutex<Vec<(String, bool)>>,
}

impl RecordingRouter {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl Router for RecordingRouter {
    fn navigate(&self, path: &str, trigger: bool) {
        self.paths.lock().unwrap().push((path.to_string(), trigger));
    }
}

/// Collaborators handed to a wizard under test, kept for assertions.
pub struct Harness {
    pub auth: Arc<FakeAuth>,
    pub presenter: Arc<RecordingPresenter>,
    pub router: Arc<RecordingRouter>,
    pub store: Arc<MemoryStore>,
}

impl Harness {
    pub fn new(auth: FakeAuth, presenter: RecordingPresenter) -> Self {
        Self {
            auth: Arc::new(auth),
            presenter: Arc::new(presenter),
            router: Arc::new(RecordingRouter::default()),
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Wizard over the bundled country table and grammar.
    pub fn wizard(&self, network: Option<&str>) -> RegistrationWizard {
        self.wizard_with_parser(Arc::new(RegionGrammar::new()), network)
    }

    pub fn wizard_with_parser(
        &self,
        parser: Arc<dyn PhoneNumberParser>,
        network: Option<&str>,
    ) -> RegistrationWizard {
        let services = Collaborators {
            countries: Arc::new(CountryTable::bundled().unwrap()),
            parser,
            auth: self.auth.clone(),
            presenter: self.presenter.clone(),
            router: self.router.clone(),
            store: self.store.clone(),
        };
        let networks = StaticNetworks(
            network
                .map(|n| vec![NetworkRegistration::new(Some(n), None)])
                .unwrap_or_default(),
        );
        RegistrationWizard::new(services, WizardConfig::default(), &networks)
    }
}
