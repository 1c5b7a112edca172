//! Line-oriented terminal front-end.

use crate::country::CountryOption;
use crate::ui::{Presenter, Router};
use crate::wizard::Page;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use tracing::{debug, info};

/// Print `prompt` and read one trimmed line. `None` on end of input.
pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{} ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Presenter that renders screens as text on stdout.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn show_update_needed(&self, message: &str) {
        println!("{}", message);
    }

    fn show_entry(&self, detection_message: &str, countries: &[CountryOption<'_>]) {
        println!("{}", detection_message);
        println!();
        for option in countries {
            let marker = if option.selected { '*' } else { ' ' };
            println!(
                "{} {:<3} {:<24} {}",
                marker, option.country.code, option.country.name, option.country.prefix
            );
        }
        println!();
    }

    fn show_page(&self, page: &Page) {
        debug!(page = %page, "Page shown");
    }

    fn show_prefix(&self, prefix: &str) {
        println!("Prefix: {}", prefix);
    }

    fn fill_confirmation_number(&self, number: &str) {
        println!("Number to confirm: {}", number);
    }

    fn set_intro_visible(&self, _visible: bool) {}

    fn set_busy(&self, busy: bool) {
        if busy {
            println!("Registering...");
        }
    }

    fn notify(&self, message: &str) {
        println!("! {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        match read_line(&format!("{} [y/N]", message)) {
            Ok(Some(answer)) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }

    fn open_external(&self, url: &str, title: &str) {
        println!("{}: {}", title, url);
    }
}

/// Router that reports navigation and remembers the last destination.
#[derive(Debug, Default)]
pub struct TerminalRouter {
    last: Mutex<Option<String>>,
}

impl TerminalRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last path navigated to.
    pub fn last_path(&self) -> Option<String> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

impl Router for TerminalRouter {
    fn navigate(&self, path: &str, trigger: bool) {
        info!(path, trigger, "Navigating");
        println!("-> {}", path);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(path.to_string());
        }
    }
}
