//! Permissive text-to-value conversions used by the typed XML accessors.
//!
//! # Design
//! Conversions never fail: integer and float parsing take the longest
//! numeric prefix of the text (after leading whitespace) and fall back to
//! `0`/`0.0` when there is none, locale-independently. Datetime parsing is
//! the one conversion with a failure slot — unparseable text yields `None`
//! rather than an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Longest-leading-prefix integer parse; `0` for non-numeric text.
///
/// Overflow saturates to `i64::MIN`/`i64::MAX`.
pub(crate) fn parse_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx = 1;
    }
    let digits_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == digits_start {
        return 0;
    }

    match trimmed[..idx].parse::<i64>() {
        Ok(value) => value,
        // Only reachable on overflow: the prefix is all sign + digits.
        Err(_) => {
            if bytes[0] == b'-' {
                i64::MIN
            } else {
                i64::MAX
            }
        }
    }
}

/// Longest-leading-prefix float parse; `0.0` for non-numeric text.
///
/// Accepts an optional sign, integer and fraction digits, and an exponent
/// when the exponent actually carries digits (`"1e"` parses as `1.0`).
pub(crate) fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx = 1;
    }
    let int_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let int_digits = idx - int_start;

    let mut frac_digits = 0;
    if idx < bytes.len() && bytes[idx] == b'.' {
        let frac_start = idx + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = frac_end - frac_start;
        if int_digits > 0 || frac_digits > 0 {
            idx = frac_end;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if idx < bytes.len() && (bytes[idx] == b'e' || bytes[idx] == b'E') {
        let mut exp_end = idx + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            idx = exp_end;
        }
    }

    trimmed[..idx].parse::<f64>().unwrap_or(0.0)
}

/// Parse text against an explicit chrono format string.
///
/// Date-only formats are accepted and land at midnight. Unparseable text
/// yields `None`.
pub(crate) fn parse_date_time(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format).ok().or_else(|| {
        NaiveDate::parse_from_str(text, format)
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_parses_plain_numbers() {
        assert_eq!(parse_integer("42"), 42);
        assert_eq!(parse_integer("-17"), -17);
        assert_eq!(parse_integer("+8"), 8);
    }

    #[test]
    fn integer_takes_leading_prefix() {
        assert_eq!(parse_integer("12abc"), 12);
        assert_eq!(parse_integer("12.9"), 12);
        assert_eq!(parse_integer("  7 items"), 7);
    }

    #[test]
    fn integer_non_numeric_is_zero() {
        assert_eq!(parse_integer("abc"), 0);
        assert_eq!(parse_integer(""), 0);
        assert_eq!(parse_integer("-"), 0);
        assert_eq!(parse_integer("."), 0);
    }

    #[test]
    fn integer_overflow_saturates() {
        assert_eq!(parse_integer("99999999999999999999"), i64::MAX);
        assert_eq!(parse_integer("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn float_parses_plain_numbers() {
        assert_eq!(parse_float("3.25"), 3.25);
        assert_eq!(parse_float("-0.5"), -0.5);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("2."), 2.0);
    }

    #[test]
    fn float_takes_leading_prefix() {
        assert_eq!(parse_float("3.9kg"), 3.9);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("2.5e-1x"), 0.25);
    }

    #[test]
    fn float_non_numeric_is_zero() {
        assert_eq!(parse_float("abc"), 0.0);
        assert_eq!(parse_float(""), 0.0);
        assert_eq!(parse_float("-."), 0.0);
    }

    #[test]
    fn date_time_parses_with_explicit_format() {
        let parsed = parse_date_time("2024-03-01 13:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parsed.to_string(), "2024-03-01 13:30:00");
    }

    #[test]
    fn date_only_format_lands_at_midnight() {
        let parsed = parse_date_time("2024-03-01", "%Y-%m-%d").unwrap();
        assert_eq!(parsed.to_string(), "2024-03-01 00:00:00");
    }

    #[test]
    fn unparseable_date_time_is_none() {
        assert_eq!(parse_date_time("not a date", "%Y-%m-%d"), None);
        assert_eq!(parse_date_time("2024-13-99", "%Y-%m-%d"), None);
    }
}
