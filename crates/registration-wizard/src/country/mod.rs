//! Country reference data and mobile-network based detection.

mod detect;

pub use detect::{detect_mcc, NetworkRegistration, NetworkSource, StaticNetworks};

use crate::error::{WizardError, WizardResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Bundled country table.
const BUNDLED_COUNTRIES: &str = include_str!("countries.json");

/// A country as offered in the country picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO region code (e.g. "ES")
    pub code: String,

    /// Display name
    pub name: String,

    /// Mobile country code. Several entries may share one.
    pub mcc: u16,

    /// Dialing prefix including the leading "+" (e.g. "+34")
    pub prefix: String,
}

impl Country {
    /// Dialing prefix without the leading "+".
    pub fn prefix_digits(&self) -> &str {
        self.prefix.trim_start_matches('+')
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Lookup over the country reference data.
pub trait CountryDirectory: Send + Sync {
    /// All entries, in display order. Region codes may repeat.
    fn countries(&self) -> &[Country];

    /// First entry for a region code.
    fn find_by_code(&self, code: &str) -> Option<&Country> {
        self.countries()
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// First entry for a mobile country code.
    fn find_by_mcc(&self, mcc: u16) -> Option<&Country> {
        self.countries().iter().find(|c| c.mcc == mcc)
    }
}

/// Immutable in-memory country table.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    countries: Vec<Country>,
}

impl CountryTable {
    /// Create a table from a list of entries.
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    /// Parse a table from a JSON array of countries.
    pub fn from_json(json: &str) -> WizardResult<Self> {
        let countries: Vec<Country> = serde_json::from_str(json)
            .map_err(|e| WizardError::ReferenceData(format!("country table: {}", e)))?;

        if let Some(bad) = countries.iter().find(|c| !c.prefix.starts_with('+')) {
            return Err(WizardError::ReferenceData(format!(
                "dialing prefix for {} must start with '+': {}",
                bad.code, bad.prefix
            )));
        }

        Ok(Self::new(countries))
    }

    /// The table shipped with the crate.
    pub fn bundled() -> WizardResult<Self> {
        Self::from_json(BUNDLED_COUNTRIES)
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl CountryDirectory for CountryTable {
    fn countries(&self) -> &[Country] {
        &self.countries
    }
}

/// One entry of the country picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryOption<'a> {
    pub country: &'a Country,
    /// Whether the entry matches the detected mobile country code
    pub selected: bool,
}

/// Picker entries, one per region code (first occurrence wins).
///
/// A region is selected when any of its entries carries the detected code,
/// including duplicates that are not emitted. The iterator is lazy; call
/// again to restart it.
pub fn list_countries<'a>(
    directory: &'a dyn CountryDirectory,
    detected_mcc: Option<u16>,
) -> impl Iterator<Item = CountryOption<'a>> + 'a {
    let detected: HashSet<&'a str> = directory
        .countries()
        .iter()
        .filter(|c| detected_mcc == Some(c.mcc))
        .map(|c| c.code.as_str())
        .collect();

    let mut added = HashSet::new();
    directory
        .countries()
        .iter()
        .filter(move |c| added.insert(c.code.clone()))
        .map(move |country| CountryOption {
            country,
            selected: detected.contains(country.code.as_str()),
        })
}
