//! Per-field coercion policies. Every parser here substitutes a documented
//! default instead of failing, so a single malformed value never aborts a
//! normalization pass.

use std::sync::OnceLock;

use chrono::{
    NaiveDate,
    NaiveDateTime,
};
use regex::Regex;

/// Raw values treated as missing for data-quality counting. String-cast
/// absent values surface as "nan"/"None" in loosely typed exports.
pub fn is_blankish(raw: Option<&str>) -> bool {
    match raw {
        None => true,
        Some(value) => value.is_empty() || value == "None" || value == "nan",
    }
}

/// String-cast a possibly absent value the way a loosely typed table does:
/// an absent value becomes the literal "nan".
pub fn string_cast(raw: Option<&str>) -> String {
    raw.unwrap_or("nan").to_string()
}

/// Title-case each word: first letter after a non-alphabetic boundary is
/// uppercased, the rest lowercased. "in progress" -> "In Progress".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Parse a closure-probability value. Keyword labels win over numerics;
/// percent values are scaled down; anything unparseable carries the 0.1
/// default so a deal always keeps nonzero weight. The result is clamped
/// into [0, 1].
pub fn parse_probability(raw: Option<&str>) -> f64 {
    let text = string_cast(raw).to_lowercase().trim().to_string();

    if text.contains("high") {
        return 0.8;
    }
    if text.contains("medium") {
        return 0.5;
    }
    if text.contains("low") {
        return 0.2;
    }

    let parsed = if text.contains('%') {
        text.replace('%', "").trim().parse::<f64>().map(|v| v / 100.0)
    } else {
        text.parse::<f64>()
    };

    match parsed {
        Ok(value) if value.is_finite() => value.clamp(0.0, 1.0),
        _ => 0.1,
    }
}

fn money_strip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The pattern is a literal; compiling it cannot fail.
    RE.get_or_init(|| Regex::new(r"[^\d.]").unwrap())
}

/// Parse a monetary value by stripping everything that is not a digit or a
/// period ("$10,000" -> 10000.0). Returns `None` when nothing numeric
/// survives.
pub fn parse_money(raw: Option<&str>) -> Option<f64> {
    let stripped = money_strip_regex().replace_all(raw?, "");
    stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%b %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Best-effort date parsing across the formats boards actually export.
/// Date-only values land at midnight. Unparseable input becomes `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blankish_values() {
        assert!(is_blankish(None));
        assert!(is_blankish(Some("")));
        assert!(is_blankish(Some("None")));
        assert!(is_blankish(Some("nan")));
        assert!(!is_blankish(Some("0")));
        assert!(!is_blankish(Some("NaN"))); // only the lowercase cast form counts
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("in progress"), "In Progress");
        assert_eq!(title_case("AVIATION"), "Aviation");
        assert_eq!(title_case("security and surveillance"), "Security And Surveillance");
        assert_eq!(title_case("nan"), "Nan");
    }

    #[test]
    fn test_probability_keywords() {
        assert_eq!(parse_probability(Some("High")), 0.8);
        assert_eq!(parse_probability(Some("Very High Chance")), 0.8);
        assert_eq!(parse_probability(Some("medium")), 0.5);
        assert_eq!(parse_probability(Some("Low")), 0.2);
    }

    #[test]
    fn test_probability_percent_and_numeric() {
        assert_eq!(parse_probability(Some("75%")), 0.75);
        assert_eq!(parse_probability(Some("0.35")), 0.35);
        // Out-of-range numerics are clamped to keep the [0,1] invariant.
        assert_eq!(parse_probability(Some("150%")), 1.0);
        assert_eq!(parse_probability(Some("-0.2")), 0.0);
    }

    #[test]
    fn test_probability_default() {
        assert_eq!(parse_probability(None), 0.1);
        assert_eq!(parse_probability(Some("")), 0.1);
        assert_eq!(parse_probability(Some("tbd")), 0.1);
        // "nan" parses as a float NaN; that still counts as unparseable here.
        assert_eq!(parse_probability(Some("nan")), 0.1);
    }

    #[test]
    fn test_money_parsing() {
        assert_eq!(parse_money(Some("$10,000")), Some(10000.0));
        assert_eq!(parse_money(Some("1234.56 USD")), Some(1234.56));
        assert_eq!(parse_money(Some("")), None);
        assert_eq!(parse_money(Some("N/A")), None);
        assert_eq!(parse_money(None), None);
    }

    #[test]
    fn test_date_parsing() {
        let parsed = parse_date("2025-03-15");
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 3, 15).and_then(|d| d.and_hms_opt(0, 0, 0)));
        assert!(parse_date("2025-03-15 14:30:00").is_some());
        assert!(parse_date("03/15/2025").is_some());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("").is_none());
    }
}
