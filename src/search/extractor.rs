//! Keyword extraction from free-text vendor searches.
//!
//! A query such as `"Wedding catering in Delhi under 40k"` is scanned against
//! fixed dictionaries of cities, event categories and service categories, and
//! two budget patterns. Each dictionary is scanned in its own order and the
//! first entry found anywhere in the query wins, so the result depends on
//! dictionary order and never on where a word sits in the query.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{Budget, SearchFilters};

pub const CITIES: &[&str] = &[
    "mumbai",
    "delhi",
    "bangalore",
    "hyderabad",
    "chennai",
    "pune",
    "jaipur",
    "kolkata",
    "ahmedabad",
    "surat",
];

pub const EVENT_TYPES: &[&str] = &[
    "wedding",
    "birthday",
    "corporate",
    "anniversary",
    "engagement",
    "party",
];

pub const VENDOR_TYPES: &[&str] = &[
    "catering",
    "photographer",
    "venue",
    "decoration",
    "music",
    "cake",
    "caterer",
    "decorator",
];

// Case folding in the budget patterns is ASCII only, so look-alikes such as
// the Kelvin sign or long s never stand in for `k` or `s`.

/// `40k`, `40K`
static THOUSANDS_SHORTHAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)(?i-u:k)").expect("shorthand budget pattern"));

/// `under 50000`, `under Rs. 50,000`, `under ₹40k`. A `k` glued to a longer
/// word (`50km`) is not a multiplier.
static UNDER_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u:under)\s*(?:(?:(?i-u:rs)\.?|₹)\s*)?([0-9]+)(?:,([0-9]+))?((?i-u:k)\b)?")
        .expect("under budget pattern")
});

/// Extract structured filters from a search query.
///
/// Never fails: anything that is not recognized leaves its field unset.
pub fn parse_search_query(query: &str) -> SearchFilters {
    let lowered = query.to_lowercase();

    let location = first_match(&lowered, CITIES).map(title_case);
    let event_type = first_match(&lowered, EVENT_TYPES).map(title_case);
    let vendor_type = first_match(&lowered, VENDOR_TYPES)
        .map(canonical_vendor_type)
        .map(title_case);

    // The "under" phrase is evaluated last and replaces the shorthand amount.
    let mut budget = shorthand_budget(query);
    if let Some(max) = under_budget(query) {
        budget = Some(max);
    }

    SearchFilters {
        location,
        event_type,
        vendor_type,
        budget: budget.map(Budget::up_to),
    }
}

fn first_match(lowered: &str, dictionary: &[&'static str]) -> Option<&'static str> {
    dictionary
        .iter()
        .copied()
        .find(|entry| lowered.contains(entry))
}

fn canonical_vendor_type(token: &'static str) -> &'static str {
    match token {
        "caterer" => "catering",
        "photographer" => "photography",
        "decorator" => "decoration",
        other => other,
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn shorthand_budget(query: &str) -> Option<u64> {
    let caps = THOUSANDS_SHORTHAND.captures(query)?;
    caps[1].parse::<u64>().ok()?.checked_mul(1000)
}

fn under_budget(query: &str) -> Option<u64> {
    let caps = UNDER_AMOUNT.captures(query)?;
    let amount = join_digit_groups(&caps).parse::<u64>().ok()?;
    if caps.get(3).is_some() {
        amount.checked_mul(1000)
    } else {
        Some(amount)
    }
}

/// Only the leading group and a single comma group are captured, so
/// `1,00,000` reads as `100`.
fn join_digit_groups(caps: &Captures<'_>) -> String {
    let mut digits = caps[1].to_string();
    if let Some(rest) = caps.get(2) {
        digits.push_str(rest.as_str());
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mumbai"), "Mumbai");
        assert_eq!(title_case("photography"), "Photography");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_canonical_vendor_type() {
        assert_eq!(canonical_vendor_type("caterer"), "catering");
        assert_eq!(canonical_vendor_type("photographer"), "photography");
        assert_eq!(canonical_vendor_type("decorator"), "decoration");
        assert_eq!(canonical_vendor_type("venue"), "venue");
    }

    #[test]
    fn test_dictionary_order_beats_position() {
        let filters = parse_search_query("Party venue in Surat or Pune for a birthday");
        assert_eq!(filters.location.as_deref(), Some("Pune"));
        assert_eq!(filters.event_type.as_deref(), Some("Birthday"));
    }

    #[test]
    fn test_caterer_is_canonicalized() {
        let filters = parse_search_query("best caterer around");
        assert_eq!(filters.vendor_type.as_deref(), Some("Catering"));
    }

    #[test]
    fn test_decorator_is_canonicalized() {
        let filters = parse_search_query("DECORATOR for anniversary");
        assert_eq!(filters.vendor_type.as_deref(), Some("Decoration"));
        assert_eq!(filters.event_type.as_deref(), Some("Anniversary"));
    }

    #[test]
    fn test_shorthand_budget() {
        assert_eq!(shorthand_budget("around 25K total"), Some(25_000));
        assert_eq!(shorthand_budget("no amount here"), None);
    }

    #[test]
    fn test_under_budget_markers() {
        assert_eq!(under_budget("under 30000"), Some(30_000));
        assert_eq!(under_budget("under Rs.30000"), Some(30_000));
        assert_eq!(under_budget("under rs 30,000"), Some(30_000));
        assert_eq!(under_budget("under ₹30,000"), Some(30_000));
        assert_eq!(under_budget("under30"), Some(30));
        assert_eq!(under_budget("under 30k"), Some(30_000));
        assert_eq!(under_budget("under budget"), None);
    }

    #[test]
    fn test_unicode_look_alikes_are_not_folded() {
        assert_eq!(shorthand_budget("40\u{212A}"), None);
        assert_eq!(under_budget("under r\u{17F}.500"), None);
        assert_eq!(under_budget("UNDER RS.500"), Some(500));
    }

    #[test]
    fn test_under_km_is_not_thousands() {
        assert_eq!(under_budget("venue under 50km away"), Some(50));
        assert_eq!(under_budget("venue under 50K, please"), Some(50_000));
        // The "under" amount still replaces the shorthand read of "50km".
        let filters = parse_search_query("venue under 50km away");
        assert_eq!(filters.max_budget(), Some(50));
    }

    #[test]
    fn test_overflowing_amount_is_ignored() {
        assert_eq!(shorthand_budget("99999999999999999999k"), None);
        assert_eq!(under_budget("under 99999999999999999999"), None);
    }

    #[test]
    fn test_under_keeps_shorthand_when_it_does_not_match() {
        let filters = parse_search_query("under the stars, 20k max");
        assert_eq!(filters.max_budget(), Some(20_000));
    }

    #[test]
    fn test_whitespace_only_query() {
        assert!(parse_search_query("   \t ").is_empty());
    }
}
