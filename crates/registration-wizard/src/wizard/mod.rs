//! Registration wizard: page stack and the screen controller.

mod controller;

pub use controller::{Collaborators, RegistrationWizard};

use std::fmt;
use tracing::warn;

/// A wizard screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Country and number entry
    Init,
    /// Number confirmation
    Confirmation,
    /// Validation-code entry
    Validate,
    Named(String),
}

impl Page {
    pub fn name(&self) -> &str {
        match self {
            Page::Init => "init",
            Page::Confirmation => "confirmation",
            Page::Validate => "validate",
            Page::Named(name) => name,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current page plus the stack of pages that led to it.
#[derive(Debug, Clone)]
pub struct WizardState {
    current: Page,
    history: Vec<Page>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current: Page::Init,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Page {
        &self.current
    }

    pub fn history(&self) -> &[Page] {
        &self.history
    }

    /// Push the current page and move to `page`.
    pub fn advance(&mut self, page: Page) {
        let previous = std::mem::replace(&mut self.current, page);
        self.history.push(previous);
    }

    /// Return to the previous page.
    ///
    /// With an empty history this does nothing and returns `None`.
    pub fn retreat(&mut self) -> Option<&Page> {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                Some(&self.current)
            }
            None => {
                warn!(current = %self.current, "Back requested with empty page history");
                None
            }
        }
    }
}

/// Phone entry as the user moves through the screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneEntryState {
    pub selected_country_code: Option<String>,
    pub raw_number: String,
    pub normalized_prefix: String,
    pub normalized_number: String,
}
