//! Registration Wizard - terminal entry point.

use anyhow::{Context, Result};
use auth_client::AuthApiClient;
use registration_wizard::{
    config::Config,
    country::StaticNetworks,
    l10n::Catalog,
    terminal::{read_line, TerminalPresenter, TerminalRouter},
    Collaborators, CountryTable, FileStore, KeyValueStore, MemoryStore, Page, RegionGrammar,
    RegistrationWizard, WizardError,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting registration wizard");

    // Load message catalog
    let catalog = match &config.wizard.messages_path {
        Some(path) => match Catalog::load(path).await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to load message catalog: {}", e);
                info!("Using built-in messages");
                Catalog::default()
            }
        },
        None => Catalog::default(),
    };

    let countries = match CountryTable::bundled() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to load country table: {}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded {} country entries", countries.len());

    // Initialize registration client
    let auth = match AuthApiClient::new(&config.auth.api_url, config.auth.timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create registration client: {}", e);
            std::process::exit(1);
        }
    };
    if !auth.health_check().await {
        warn!(url = %config.auth.api_url, "Registration API is not reachable");
    }

    // Initialize storage
    let store: Arc<dyn KeyValueStore> = if config.storage.persist {
        Arc::new(FileStore::new(config.storage.path.clone()))
    } else {
        info!("Persistence disabled, using in-memory storage");
        Arc::new(MemoryStore::new())
    };

    let router = Arc::new(TerminalRouter::new());
    let services = Collaborators {
        countries: Arc::new(countries),
        parser: Arc::new(RegionGrammar::new()),
        auth: Arc::new(auth),
        presenter: Arc::new(TerminalPresenter),
        router: router.clone(),
        store,
    };

    let networks = StaticNetworks::parse(&config.device.networks);
    let mut wizard =
        RegistrationWizard::new(services, config.wizard.clone(), &networks).with_catalog(catalog);

    if let Err(e) = run(&mut wizard).await {
        error!("Wizard error: {:#}", e);
        std::process::exit(1);
    }

    if let Some(path) = router.last_path() {
        info!(destination = %path, "Wizard finished");
    }
}

/// Drive the wizard from stdin until the user registers or quits.
async fn run(wizard: &mut RegistrationWizard) -> Result<()> {
    wizard.render();
    if wizard.is_outdated() {
        return Ok(());
    }

    loop {
        match wizard.state().current().clone() {
            Page::Init => {
                let Some(input) =
                    read_line("Country code (enter keeps current, 'terms', 'q' quits):")
                        .context("Failed to read country")?
                else {
                    return Ok(());
                };
                match input.as_str() {
                    "q" => return Ok(()),
                    "terms" => {
                        wizard.show_terms();
                        continue;
                    }
                    "" => {}
                    code => {
                        if let Err(e) = wizard.select_country(code) {
                            warn!("{}", e);
                            continue;
                        }
                    }
                }

                let Some(number) = read_line("Phone number:").context("Failed to read number")?
                else {
                    return Ok(());
                };
                match wizard.goto_confirmation(&number) {
                    Ok(_) | Err(WizardError::MissingCountrySelection) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            Page::Confirmation => {
                let current = wizard.entry().normalized_number.clone();
                let Some(input) = read_line(&format!(
                    "Confirm number [{}] ('b' back, 'c' I have a code):",
                    current
                ))
                .context("Failed to read confirmation")?
                else {
                    return Ok(());
                };

                match input.as_str() {
                    "b" => {
                        wizard.retreat();
                    }
                    "c" => {
                        wizard.goto_validate(&current)?;
                        return Ok(());
                    }
                    entered => {
                        let number = if entered.is_empty() { current.as_str() } else { entered };
                        match wizard.register(number).await {
                            Ok(_) => return Ok(()),
                            // Already shown to the user; stay on the form
                            Err(WizardError::Registration(_)) => {}
                            Err(e) => return Err(e.into()),
                        }
                    }
                }
            }
            _ => return Ok(()),
        }
    }
}
