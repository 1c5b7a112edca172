//! Built-in numbering plans for the regions in the bundled country table.

use super::{digits_only, ParsedNumber, PhoneNumberParser};
use once_cell::sync::Lazy;
use regex::Regex;

/// (region, calling code, trunk prefix, national significant number pattern)
const PLANS: &[(&str, &str, Option<&str>, &str)] = &[
    ("AR", "54", Some("0"), r"^9?[1-9]\d{9}$"),
    ("AT", "43", Some("0"), r"^[1-9]\d{3,12}$"),
    ("AU", "61", Some("0"), r"^[2-478]\d{8}$"),
    ("BE", "32", Some("0"), r"^[1-9]\d{7,8}$"),
    ("BR", "55", Some("0"), r"^[1-9]{2}\d{8,9}$"),
    ("CA", "1", None, r"^[2-9]\d{2}[2-9]\d{6}$"),
    ("CH", "41", Some("0"), r"^[1-9]\d{8}$"),
    ("CL", "56", None, r"^[2-9]\d{8}$"),
    ("CN", "86", Some("0"), r"^1[3-9]\d{9}$"),
    ("CO", "57", None, r"^(?:3\d{9}|60\d{8})$"),
    ("DE", "49", Some("0"), r"^[1-9]\d{7,11}$"),
    ("ES", "34", None, r"^[5-9]\d{8}$"),
    ("FR", "33", Some("0"), r"^[1-9]\d{8}$"),
    ("GB", "44", Some("0"), r"^[1-9]\d{9}$"),
    ("GP", "590", Some("0"), r"^[5-9]\d{8}$"),
    ("GR", "30", None, r"^[26]\d{9}$"),
    ("IE", "353", Some("0"), r"^[1-9]\d{6,9}$"),
    ("IN", "91", Some("0"), r"^[6-9]\d{9}$"),
    ("IT", "39", None, r"^(?:3\d{8,9}|0\d{5,10})$"),
    ("JP", "81", Some("0"), r"^[1-9]\d{8,9}$"),
    ("MA", "212", Some("0"), r"^[5-7]\d{8}$"),
    ("MQ", "596", Some("0"), r"^[5-9]\d{8}$"),
    ("MX", "52", None, r"^[1-9]\d{9}$"),
    ("NL", "31", Some("0"), r"^[1-9]\d{8}$"),
    ("PE", "51", None, r"^(?:9\d{8}|[1-8]\d{7})$"),
    ("PL", "48", None, r"^[1-9]\d{8}$"),
    ("PT", "351", None, r"^[2-9]\d{8}$"),
    ("SE", "46", Some("0"), r"^[1-9]\d{6,9}$"),
    ("TR", "90", Some("0"), r"^[2-589]\d{9}$"),
    ("US", "1", None, r"^[2-9]\d{2}[2-9]\d{6}$"),
    ("UY", "598", Some("0"), r"^[2-9]\d{7}$"),
    ("VE", "58", Some("0"), r"^[24]\d{9}$"),
];

/// Longest calling code in the table.
const MAX_CALLING_CODE_LEN: usize = 3;

struct NumberingPlan {
    region: &'static str,
    calling_code: &'static str,
    trunk_prefix: Option<&'static str>,
    pattern: Regex,
}

impl NumberingPlan {
    /// National significant number for `digits`, dropping the trunk prefix if needed.
    fn national<'a>(&self, digits: &'a str) -> Option<&'a str> {
        if self.pattern.is_match(digits) {
            return Some(digits);
        }
        let trunk = self.trunk_prefix?;
        digits
            .strip_prefix(trunk)
            .filter(|rest| self.pattern.is_match(rest))
    }

    fn number(&self, national: &str) -> ParsedNumber {
        ParsedNumber {
            region: self.region.to_string(),
            national_number: national.to_string(),
            international: format!("+{}{}", self.calling_code, national),
        }
    }
}

static PLAN_TABLE: Lazy<Vec<NumberingPlan>> = Lazy::new(|| {
    PLANS
        .iter()
        .map(|&(region, calling_code, trunk_prefix, pattern)| NumberingPlan {
            region,
            calling_code,
            trunk_prefix,
            pattern: Regex::new(pattern).expect("numbering plan pattern must compile"),
        })
        .collect()
});

/// Parser backed by the built-in numbering plans.
///
/// Input is first read as international (calling code followed by the
/// national number), then as a national number of the hinted region.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionGrammar;

impl RegionGrammar {
    pub fn new() -> Self {
        Self
    }

    /// Whether a numbering plan exists for `region`.
    pub fn supports(&self, region: &str) -> bool {
        PLAN_TABLE
            .iter()
            .any(|p| p.region.eq_ignore_ascii_case(region))
    }

    fn parse_international(&self, digits: &str, hint: &str) -> Option<ParsedNumber> {
        for len in (1..=MAX_CALLING_CODE_LEN).rev() {
            if digits.len() <= len {
                continue;
            }
            let (code, rest) = digits.split_at(len);

            let candidates: Vec<(&NumberingPlan, &str)> = PLAN_TABLE
                .iter()
                .filter(|p| p.calling_code == code)
                .filter_map(|p| p.national(rest).map(|n| (p, n)))
                .collect();

            // Shared calling codes resolve to the hinted region when it fits
            let chosen = candidates
                .iter()
                .find(|(p, _)| p.region == hint)
                .or_else(|| candidates.first());

            if let Some((plan, national)) = chosen {
                return Some(plan.number(national));
            }
        }
        None
    }

    fn parse_national(&self, digits: &str, hint: &str) -> Option<ParsedNumber> {
        let plan = PLAN_TABLE.iter().find(|p| p.region == hint)?;
        plan.national(digits).map(|n| plan.number(n))
    }
}

impl PhoneNumberParser for RegionGrammar {
    fn parse(&self, number: &str, region_hint: &str) -> Option<ParsedNumber> {
        let digits = digits_only(number);
        if digits.is_empty() {
            return None;
        }
        let hint = region_hint.to_ascii_uppercase();

        self.parse_international(&digits, &hint)
            .or_else(|| self.parse_national(&digits, &hint))
    }
}
