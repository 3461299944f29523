//! Free-text dollar input normalization
//!
//! Volume fields arrive as whatever the agent typed ("$15,000", "15000.50",
//! ""). Parsing failures resolve to 0.0 so a half-typed value degrades to an
//! empty calculation instead of an error.

/// Parse a free-text dollar amount, stripping `$` and thousands separators.
///
/// Empty or unparsable input yields `0.0`.
pub fn parse_dollar_input(text: &str) -> f64 {
    let cleaned = text.replace(',', "").replace('$', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_dollar_input("15000"), 15000.0);
        assert_eq!(parse_dollar_input("15000.50"), 15000.50);
    }

    #[test]
    fn test_parse_with_separators() {
        assert_eq!(parse_dollar_input("15,000"), 15000.0);
        assert_eq!(parse_dollar_input("$15,000"), 15000.0);
        assert_eq!(parse_dollar_input("$1,234,567.89"), 1234567.89);
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(parse_dollar_input("  $500 "), 500.0);
    }

    #[test]
    fn test_parse_fails_soft_to_zero() {
        assert_eq!(parse_dollar_input(""), 0.0);
        assert_eq!(parse_dollar_input("   "), 0.0);
        assert_eq!(parse_dollar_input("abc"), 0.0);
        assert_eq!(parse_dollar_input("12abc"), 0.0);
        assert_eq!(parse_dollar_input("$"), 0.0);
    }
}
