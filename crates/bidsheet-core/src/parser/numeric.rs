//! Lenient numeric parsing for bid sheet fields.
//!
//! Failures never propagate: every helper yields a value (zero on failure)
//! together with a flag saying whether the text really parsed.

use std::borrow::Cow;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Everything that is not a decimal digit or a decimal point.
    pub static ref NON_NUMERIC: Regex = Regex::new(r"[^0-9.]").unwrap();

    /// A unit-of-measure code printed as its own field (EA, FT, PKG, ROLL).
    pub static ref UNIT_TOKEN: Regex = Regex::new(r"^[A-Z]{1,4}$").unwrap();
}

/// A parsed value and whether parsing succeeded.
///
/// When `ok` is false, `value` is the type's zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub ok: bool,
}

impl<T> Parsed<T> {
    fn success(value: T) -> Self {
        Self { value, ok: true }
    }
}

impl<T: Default> Parsed<T> {
    fn fallback() -> Self {
        Self {
            value: T::default(),
            ok: false,
        }
    }
}

/// Parse `text` as `T`, substituting `T::default()` on failure.
pub fn parse_or_default<T>(text: &str) -> Parsed<T>
where
    T: FromStr + Default,
{
    match text.parse::<T>() {
        Ok(value) => Parsed::success(value),
        Err(_) => Parsed::fallback(),
    }
}

/// Parse a float, rejecting NaN and infinities.
pub fn parse_finite_or_zero(text: &str) -> Parsed<f64> {
    match parse_or_default::<f64>(text) {
        parsed if parsed.ok && parsed.value.is_finite() => parsed,
        _ => Parsed::fallback(),
    }
}

/// Remove every character that is not a digit or `.`.
pub fn strip_non_numeric(field: &str) -> Cow<'_, str> {
    NON_NUMERIC.replace_all(field, "")
}

/// Byte length of the leading run of digits and `.` in `field`.
pub fn numeric_prefix_len(field: &str) -> usize {
    field
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(field.len())
}

/// Parse a quantity field such as `5EA`: digits are stripped out and read as
/// an integer, so `12.5EA` fails and yields zero.
pub fn parse_quantity(field: &str) -> Parsed<u32> {
    parse_or_default(&strip_non_numeric(field))
}

/// Parse a price field such as `12.50/EA`.
pub fn parse_price(field: &str) -> Parsed<f64> {
    parse_finite_or_zero(&strip_non_numeric(field))
}

/// Parse an extended total. Only surrounding whitespace and `,` digit
/// grouping are tolerated; anything else fails and reads as zero.
pub fn parse_total(field: &str) -> Parsed<f64> {
    let trimmed = field.trim();
    if trimmed.contains(',') {
        parse_finite_or_zero(&trimmed.replace(',', ""))
    } else {
        parse_finite_or_zero(trimmed)
    }
}

/// True when `field` is all digits (at least one).
pub fn is_bare_integer(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

/// True when `field` looks like a free-standing unit-of-measure code.
pub fn is_unit_token(field: &str) -> bool {
    UNIT_TOKEN.is_match(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5EA"), Parsed { value: 5, ok: true });
        assert_eq!(parse_quantity("120FT"), Parsed { value: 120, ok: true });
        assert_eq!(parse_quantity("EA"), Parsed { value: 0, ok: false });
        assert_eq!(parse_quantity("12.5EA"), Parsed { value: 0, ok: false });
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("12.50/EA").value, 12.5);
        assert_eq!(parse_price("$3.75/FT").value, 3.75);
        assert!(!parse_price("CALL").ok);
        assert_eq!(parse_price("CALL").value, 0.0);
        assert!(!parse_price("1.2.3").ok);
    }

    #[test]
    fn test_parse_total() {
        assert_eq!(parse_total("62.50"), Parsed { value: 62.5, ok: true });
        assert_eq!(parse_total("1,234.50").value, 1234.5);
        assert_eq!(parse_total("0.00"), Parsed { value: 0.0, ok: true });
        assert_eq!(parse_total("part"), Parsed { value: 0.0, ok: false });
        assert_eq!(parse_total("$62.50"), Parsed { value: 0.0, ok: false });
    }

    #[test]
    fn test_parse_total_rejects_non_finite() {
        assert!(!parse_total("NaN").ok);
        assert!(!parse_total("inf").ok);
        assert!(!parse_total("infinity").ok);
    }

    #[test]
    fn test_numeric_prefix_len() {
        assert_eq!(numeric_prefix_len("5EA"), 1);
        assert_eq!(numeric_prefix_len("12.5LF"), 4);
        assert_eq!(numeric_prefix_len("EA"), 0);
        assert_eq!(numeric_prefix_len("100"), 3);
        assert_eq!(numeric_prefix_len("3µm"), 1);
    }

    #[test]
    fn test_unit_tokens() {
        assert!(is_unit_token("EA"));
        assert!(is_unit_token("ROLL"));
        assert!(!is_unit_token("Widget"));
        assert!(!is_unit_token("EACH1"));
        assert!(!is_unit_token("10023"));
        assert!(!is_unit_token(""));

        assert!(is_bare_integer("5"));
        assert!(!is_bare_integer("5EA"));
        assert!(!is_bare_integer(""));
    }
}
