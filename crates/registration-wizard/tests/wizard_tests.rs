//! Integration tests for the registration wizard flow.

mod common;

use common::{FakeAuth, FakeOutcome, Harness, RecordingPresenter, StubParser};
use registration_wizard::{
    store::{IS_PIN_SENT, PHONE_AND_CC},
    KeyValueStore, Page, Route, WizardError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn harness(outcome: FakeOutcome) -> Harness {
    Harness::new(FakeAuth::new(outcome), RecordingPresenter::default())
}

#[test]
fn test_unknown_mcc_lists_everything_unselected() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    let wizard = h.wizard(Some("999-01"));

    assert_eq!(wizard.detected_mcc(), Some(999));
    let options: Vec<_> = wizard.list_countries().collect();
    assert!(!options.is_empty());
    assert!(options.iter().all(|o| !o.selected));
    assert!(wizard.initial_selection().is_none());

    let mut codes: Vec<_> = options.iter().map(|o| o.country.code.as_str()).collect();
    let total = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), total);
}

#[test]
fn test_render_preselects_detected_country() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    let mut wizard = h.wizard(Some("208-01"));

    wizard.render();

    let entries = h.presenter.entries.lock().unwrap().clone();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "We detected you are in France.");
    let selected: Vec<_> = entries[0].1.iter().filter(|(_, s)| *s).collect();
    assert_eq!(selected, vec![&("FR".to_string(), true)]);
    assert_eq!(h.presenter.prefixes.lock().unwrap().clone(), vec!["+33"]);
    assert_eq!(wizard.entry().selected_country_code.as_deref(), Some("FR"));
}

#[test]
fn test_render_preselects_region_of_secondary_mcc() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    let mut wizard = h.wizard(Some("311-480"));

    wizard.render();

    assert_eq!(
        wizard.detection_message(),
        "We detected you are in United States."
    );
    assert_eq!(wizard.initial_selection().map(|c| c.code.as_str()), Some("US"));
    assert_eq!(h.presenter.prefixes.lock().unwrap().clone(), vec!["+1"]);
    assert_eq!(wizard.entry().selected_country_code.as_deref(), Some("US"));
}

#[test]
fn test_select_country() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    let mut wizard = h.wizard(None);

    assert_eq!(assert_ok!(wizard.select_country("ES")), "+34");
    assert_eq!(wizard.entry().selected_country_code.as_deref(), Some("ES"));

    let result = assert_err!(wizard.select_country("XX"));
    assert!(matches!(result, WizardError::CountryNotFound(code) if code == "XX"));
    assert_eq!(wizard.entry().selected_country_code.as_deref(), Some("ES"));
}

#[test]
fn test_valid_number_needs_no_prompt() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    let mut wizard = h.wizard(None);
    wizard.select_country("ES").unwrap();

    assert!(wizard.goto_confirmation("600111222").unwrap());

    assert!(h.presenter.prompts().is_empty());
    assert_eq!(wizard.state().current(), &Page::Confirmation);
    assert_eq!(wizard.entry().normalized_number, "600111222");
    assert_eq!(wizard.entry().normalized_prefix, "34");
    assert_eq!(h.presenter.filled.lock().unwrap().clone(), vec!["600111222"]);
}

#[test]
fn test_valid_overseas_numbers_need_no_prompt() {
    for (code, number) in [("GP", "690001234"), ("MQ", "696123456")] {
        let h = harness(FakeOutcome::NeedsValidation(false));
        let mut wizard = h.wizard(Some("340-01"));
        assert_ok!(wizard.select_country(code));

        assert!(assert_ok!(wizard.goto_confirmation(number)), "{}", code);
        assert!(h.presenter.prompts().is_empty(), "{}", code);
        assert_eq!(wizard.state().current(), &Page::Confirmation);
    }
}

#[test]
fn test_region_mismatch_prompts_user() {
    for accept in [true, false] {
        let h = Harness::new(
            FakeAuth::new(FakeOutcome::NeedsValidation(false)),
            RecordingPresenter::accepting(accept),
        );
        let mut wizard = h.wizard_with_parser(Arc::new(StubParser(Some("FR"))), None);
        wizard.select_country("ES").unwrap();

        assert_eq!(wizard.goto_confirmation("600111222").unwrap(), accept);

        let prompts = h.presenter.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("+34 600111222"));
        let expected = if accept { Page::Confirmation } else { Page::Init };
        assert_eq!(wizard.state().current(), &expected);
    }
}

#[test]
fn test_unparseable_number_prompts_user() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    let mut wizard = h.wizard_with_parser(Arc::new(StubParser(None)), None);
    wizard.select_country("ES").unwrap();

    assert!(!wizard.goto_confirmation("12").unwrap());
    assert_eq!(h.presenter.prompts().len(), 1);
}

#[test]
fn test_advance_then_retreat_returns_to_init() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    let mut wizard = h.wizard(Some("214-07"));
    wizard.render();

    wizard.goto_confirmation("600111222").unwrap();
    assert_eq!(wizard.state().history(), &[Page::Init]);

    assert_eq!(wizard.retreat(), Some(&Page::Init));
    assert!(wizard.state().history().is_empty());
    assert!(wizard.retreat().is_none());
    assert_eq!(wizard.state().current(), &Page::Init);
}

#[tokio::test]
async fn test_register_known_user_goes_to_inbox() {
    let h = Harness::new(
        FakeAuth::new(FakeOutcome::NeedsValidation(false)).with_screen_name("ana"),
        RecordingPresenter::default(),
    );
    h.store.set(IS_PIN_SENT, "true").await.unwrap();
    let mut wizard = h.wizard(Some("214-07"));
    wizard.render();

    let route = wizard.register("600111222").await.unwrap();

    assert_eq!(route, Route::Inbox);
    assert_eq!(h.router.paths(), vec!["inbox"]);
    assert!(h.store.get(IS_PIN_SENT).await.unwrap().is_none());
    assert!(h.store.get(PHONE_AND_CC).await.unwrap().is_none());
    assert_eq!(h.presenter.busy(), vec![true, false]);
}

#[tokio::test]
async fn test_register_new_user_goes_to_profile() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    h.store.set(IS_PIN_SENT, "true").await.unwrap();
    let mut wizard = h.wizard(None);
    assert_ok!(wizard.select_country("ES"));

    let route = assert_ok!(wizard.register("600111222").await);

    assert_eq!(route, Route::Profile);
    assert_eq!(h.router.paths(), vec!["profile"]);
    assert!(h.store.get(IS_PIN_SENT).await.unwrap().is_none());
    assert!(h.store.get(PHONE_AND_CC).await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_needs_validation() {
    let h = harness(FakeOutcome::NeedsValidation(true));
    let mut wizard = h.wizard(Some("214-07"));
    wizard.render();

    let route = wizard.register("600111222").await.unwrap();

    assert_eq!(
        route,
        Route::Validate {
            number: "600111222".into(),
            prefix: "34".into(),
        }
    );
    assert_eq!(h.router.paths(), vec!["validate/600111222/34"]);
    assert_eq!(h.store.get(IS_PIN_SENT).await.unwrap(), Some("true".into()));
    assert_eq!(
        h.store.get(PHONE_AND_CC).await.unwrap(),
        Some("600111222/34".into())
    );
    assert_eq!(
        h.auth.calls(),
        vec![("34".into(), "600111222".into(), "es-ES".into())]
    );
}

#[tokio::test]
async fn test_too_recent_shows_minutes() {
    let h = harness(FakeOutcome::TooRecent(125));
    let mut wizard = h.wizard(None);
    wizard.select_country("ES").unwrap();

    let result = wizard.register("600111222").await;

    assert!(matches!(result, Err(WizardError::Registration(_))));
    assert!(h.router.paths().is_empty());
    assert_eq!(
        h.presenter.notices(),
        vec!["A code was sent recently. Please try again in 3 minutes."]
    );
    assert_eq!(h.presenter.intro(), vec![false, true]);
    assert!(!wizard.is_submitting());
}

#[tokio::test]
async fn test_error_notices() {
    let cases = [
        (
            FakeOutcome::Structured,
            "Registration failed. Please try again later.",
        ),
        (
            FakeOutcome::RateLimited,
            "Too many attempts. Please wait before trying again.",
        ),
        (
            FakeOutcome::Unexpected,
            "Registration failed. Please try again later.",
        ),
    ];

    for (outcome, expected) in cases {
        let h = harness(outcome);
        let mut wizard = h.wizard(None);
        wizard.select_country("ES").unwrap();

        assert!(wizard.register("600111222").await.is_err());
        assert_eq!(h.presenter.notices(), vec![expected]);
    }
}

#[tokio::test]
async fn test_concurrent_register_is_rejected() {
    let h = Harness::new(
        FakeAuth::new(FakeOutcome::NeedsValidation(false)).with_delay(Duration::from_millis(50)),
        RecordingPresenter::default(),
    );
    let mut wizard = h.wizard(None);
    wizard.select_country("ES").unwrap();

    let (first, second) = tokio::join!(wizard.register("600111222"), wizard.register("600111222"));

    assert_eq!(first.unwrap(), Route::Profile);
    assert!(matches!(second, Err(WizardError::SubmissionInFlight)));
    assert_eq!(h.auth.calls().len(), 1);
    assert!(!wizard.is_submitting());

    // Free again once the first request finished
    assert!(wizard.register("600111222").await.is_ok());
}

#[tokio::test]
async fn test_register_without_selection() {
    let h = harness(FakeOutcome::NeedsValidation(false));
    let wizard = h.wizard(None);

    let result = wizard.register("600111222").await;

    assert!(matches!(result, Err(WizardError::MissingCountrySelection)));
    assert!(h.auth.calls().is_empty());
    assert_eq!(h.presenter.notices(), vec!["Please select a country."]);
}
