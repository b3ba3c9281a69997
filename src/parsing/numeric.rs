//! Numeric normalization for financial values.
//!
//! Filings present numbers with currency symbols, thousands separators and
//! the accounting convention of parenthesized negatives ("(1,234.50)" means
//! -1234.50). Every extraction strategy in this crate funnels raw cell or
//! fact text through [`parse_numeric`] so they all agree on what counts as
//! a number.

/// Parses a financial value into a float, or `None` if no number is present.
///
/// Rules:
/// - a value wrapped in parentheses is negative;
/// - everything except digits, a decimal point and a leading minus sign is
///   stripped before conversion;
/// - anything that still fails to parse is rejected, never zero-filled.
///
/// Normalization is idempotent: re-parsing the string form of a parsed
/// value yields the same value.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parenthesized = trimmed.starts_with('(') && trimmed.ends_with(')');

    let mut cleaned = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if c.is_ascii_digit() || c == '.' {
            cleaned.push(c);
        } else if c == '-' && cleaned.is_empty() {
            cleaned.push(c);
        }
    }

    let value: f64 = cleaned.parse().ok()?;
    if parenthesized {
        Some(-value.abs())
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_separated_numbers() {
        assert_eq!(parse_numeric("1234"), Some(1234.0));
        assert_eq!(parse_numeric("1,234.50"), Some(1234.50));
        assert_eq!(parse_numeric("$2,500,000"), Some(2_500_000.0));
        assert_eq!(parse_numeric("  42.5 "), Some(42.5));
    }

    #[test]
    fn parenthesized_values_are_negative() {
        assert_eq!(parse_numeric("(1,234.50)"), Some(-1234.50));
        assert_eq!(parse_numeric("(2,500)"), Some(-2500.0));
        assert_eq!(parse_numeric("($500)"), Some(-500.0));
    }

    #[test]
    fn leading_minus_is_preserved() {
        assert_eq!(parse_numeric("-1234.5"), Some(-1234.5));
    }

    #[test]
    fn unparseable_values_are_omitted_not_zeroed() {
        assert_eq!(parse_numeric("N/A"), None);
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("--"), None);
        assert_eq!(parse_numeric("1.2.3"), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["(1,234.50)", "$5,000", "-42", "17.25"] {
            let once = parse_numeric(raw).unwrap();
            let twice = parse_numeric(&once.to_string()).unwrap();
            assert_eq!(once, twice);
        }
    }
}
