//! Calculator amount parsing

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Amount is empty")]
    Empty,
    #[error("Not a number: {0}")]
    NotANumber(String),
    #[error("Amount must be a finite, non-negative number, got {0}")]
    OutOfRange(f64),
}

/// Parse a token amount typed by a user.
///
/// All whitespace is removed first, so `"1 000.5"` reads as `1000.5`.
pub fn parse_amount(text: &str) -> Result<f64, InputError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(InputError::Empty);
    }

    let amount: f64 = compact
        .parse()
        .map_err(|_| InputError::NotANumber(compact.clone()))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(InputError::OutOfRange(amount));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_amount("5"), Ok(5.0));
        assert_eq!(parse_amount("0"), Ok(0.0));
        assert_eq!(parse_amount("12.75"), Ok(12.75));
    }

    #[test]
    fn test_parse_strips_whitespace() {
        assert_eq!(parse_amount("  42 \n"), Ok(42.0));
        assert_eq!(parse_amount("1 000 000"), Ok(1_000_000.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_amount("abc"), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_amount("1,5"), Err(InputError::NotANumber(_))));
        assert_eq!(parse_amount("   "), Err(InputError::Empty));
    }

    #[test]
    fn test_parse_rejects_negative_and_non_finite() {
        assert!(matches!(parse_amount("-3"), Err(InputError::OutOfRange(_))));
        assert!(matches!(parse_amount("inf"), Err(InputError::OutOfRange(_))));
        assert!(matches!(parse_amount("NaN"), Err(InputError::OutOfRange(_))));
    }
}
