//! Presentation and navigation seams.

use crate::country::CountryOption;
use crate::wizard::Page;
use std::fmt;

/// Destinations reachable from the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Inbox,
    Profile,
    /// Validation-code entry for a number and its dialing prefix
    Validate { number: String, prefix: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Inbox => "inbox".to_string(),
            Route::Profile => "profile".to_string(),
            Route::Validate { number, prefix } => format!("validate/{}/{}", number, prefix),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Application navigation.
#[cfg_attr(test, mockall::automock)]
pub trait Router: Send + Sync {
    /// Go to `path`; `trigger` runs the destination's handler.
    fn navigate(&self, path: &str, trigger: bool);
}

/// Everything the wizard shows to the user.
///
/// `notify` and `confirm` block until the user answers.
pub trait Presenter: Send + Sync {
    /// Replace the wizard with the update-needed screen.
    fn show_update_needed(&self, message: &str);

    /// Render the entry screen.
    fn show_entry(&self, detection_message: &str, countries: &[CountryOption<'_>]);

    fn show_page(&self, page: &Page);

    /// Show the dialing prefix next to the number field.
    fn show_prefix(&self, prefix: &str);

    /// Pre-fill the number field of the confirmation screen.
    fn fill_confirmation_number(&self, number: &str);

    fn set_intro_visible(&self, visible: bool);

    /// Disable submission and show the spinner while `busy`.
    fn set_busy(&self, busy: bool);

    fn notify(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;

    fn open_external(&self, url: &str, title: &str);
}
