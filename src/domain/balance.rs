//! Balance text parsing
//!
//! Holder pages show balances as formatted text ("1 234 567.89 TYVM",
//! "8,084,496.13"). Group separators are removed and the first numeric run
//! is taken.

use regex::Regex;
use std::sync::OnceLock;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\d.]+").expect("static regex is valid"))
}

/// Extract a balance from displayed text.
///
/// Returns `None` if the text holds no parseable number.
pub fn parse_balance_text(text: &str) -> Option<f64> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let run = number_pattern().find(&compact)?;
    run.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_grouped() {
        assert_eq!(parse_balance_text("1 234 567.89"), Some(1_234_567.89));
    }

    #[test]
    fn test_parse_comma_grouped_with_suffix() {
        assert_eq!(parse_balance_text("8,084,496.13 TYVM"), Some(8_084_496.13));
    }

    #[test]
    fn test_parse_non_breaking_spaces() {
        assert_eq!(parse_balance_text("12\u{a0}500\u{202f}000"), Some(12_500_000.0));
    }

    #[test]
    fn test_parse_leading_label() {
        assert_eq!(parse_balance_text("Balance: 42"), Some(42.0));
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse_balance_text(""), None);
        assert_eq!(parse_balance_text("—"), None);
        // "1.2.3" matches the numeric run but is not a float
        assert_eq!(parse_balance_text("1.2.3"), None);
    }
}
