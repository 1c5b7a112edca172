//! Phone number parsing and normalization.

mod grammar;

pub use grammar::RegionGrammar;

use crate::country::Country;

/// A phone number the parser accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNumber {
    /// Region the number belongs to, uppercase
    pub region: String,
    /// National significant number, trunk prefix removed
    pub national_number: String,
    /// "+<calling code><national number>"
    pub international: String,
}

/// Parses a number against a region's numbering plan.
pub trait PhoneNumberParser: Send + Sync {
    /// Parse `number` using `region_hint` for national input.
    ///
    /// Returns `None` when the number cannot be parsed.
    fn parse(&self, number: &str, region_hint: &str) -> Option<ParsedNumber>;
}

/// A number as entered, paired with the dialing prefix of the chosen country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneParts {
    /// Dialing prefix without "+"
    pub prefix: String,
    /// Number as typed by the user
    pub number: String,
}

impl PhoneParts {
    pub fn new(country: &Country, number: &str) -> Self {
        Self {
            prefix: country.prefix_digits().to_string(),
            number: number.trim().to_string(),
        }
    }

    /// Prefix followed by the number, as handed to the parser.
    pub fn complete(&self) -> String {
        format!("{}{}", self.prefix, self.number)
    }

    /// The number with every non-digit removed.
    pub fn digits(&self) -> String {
        digits_only(&self.number)
    }
}

/// Strip everything but ASCII digits.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}
