//! Result formatting
//!
//! Integers render without a decimal point. Fractions render with up to
//! `max_fraction_digits` digits, trailing zeros stripped. Values whose
//! magnitude reaches the grouping threshold get a thousands separator in the
//! integer part; if grouping fails the ungrouped string is returned.

use tracing::warn;

use crate::shared::errors::FormatError;
use crate::shared::settings::EngineSettings;

/// Format a finite converted value for display
pub fn format_number(value: f64, settings: &EngineSettings) -> String {
    // Avoid rendering "-0"
    let value = if value == 0.0 { 0.0 } else { value };

    let plain = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let fixed = format!("{:.*}", settings.max_fraction_digits, value);
        strip_trailing_zeros(&fixed)
    };

    // Decide on the rounded value so 999.999999999 shown as "1000" is grouped too
    let shown = plain.parse::<f64>().unwrap_or(value);
    if shown.abs() < settings.grouping_threshold {
        return plain;
    }

    match group_thousands(&plain, settings.thousands_separator) {
        Ok(grouped) => grouped,
        Err(e) => {
            warn!("[format_number] Grouping failed for '{}': {}, using ungrouped", plain, e);
            plain
        }
    }
}

fn strip_trailing_zeros(fixed: &str) -> String {
    if !fixed.contains('.') {
        return fixed.to_string();
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    // "-0.00000000" collapses to "-0"
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Insert `separator` every three digits of the integer part.
/// The sign and the fractional part are left untouched.
fn group_thousands(plain: &str, separator: char) -> Result<String, FormatError> {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    if integer.is_empty() {
        return Err(FormatError::Empty);
    }
    if let Some(bad) = integer.chars().find(|c| !c.is_ascii_digit()) {
        return Err(FormatError::NonDigit(bad));
    }

    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3 + sign.len());
    grouped.push_str(sign);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64) -> String {
        format_number(value, &EngineSettings::default())
    }

    #[test]
    fn test_integer_has_no_decimal_point() {
        assert_eq!(fmt(10.0), "10");
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(-42.0), "-42");
    }

    #[test]
    fn test_fraction_strips_trailing_zeros() {
        assert_eq!(fmt(16.4042), "16.4042");
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(1.0 / 3.0), "0.33333333");
    }

    #[test]
    fn test_near_integer_rounds_clean() {
        assert_eq!(fmt(2.999_999_999_9), "3");
    }

    #[test]
    fn test_tiny_value_rounds_to_zero() {
        assert_eq!(fmt(1e-12), "0");
        assert_eq!(fmt(-1e-12), "0");
    }

    #[test]
    fn test_grouping_at_threshold() {
        assert_eq!(fmt(999.5), "999.5");
        assert_eq!(fmt(1000.0), "1,000");
        assert_eq!(fmt(3280.84), "3,280.84");
        assert_eq!(fmt(1_234_567.891), "1,234,567.891");
        assert_eq!(fmt(-1_234_567.0), "-1,234,567");
    }

    #[test]
    fn test_grouping_uses_rounded_value() {
        assert_eq!(fmt(999.999_999_999), "1,000");
    }

    #[test]
    fn test_fraction_left_untouched_by_grouping() {
        assert_eq!(fmt(12345.12345678), "12,345.12345678");
    }

    #[test]
    fn test_custom_separator_and_digits() {
        let settings = EngineSettings {
            thousands_separator: '\'',
            max_fraction_digits: 2,
            ..EngineSettings::default()
        };
        assert_eq!(format_number(1234.5678, &settings), "1'234.57");
    }

    #[test]
    fn test_group_thousands_rejects_non_digits() {
        assert_eq!(group_thousands("1e21", ','), Err(FormatError::NonDigit('e')));
        assert_eq!(group_thousands("-.5", ','), Err(FormatError::Empty));
    }

    #[test]
    fn test_group_thousands_short_integer() {
        assert_eq!(group_thousands("123", ',').unwrap(), "123");
        assert_eq!(group_thousands("1234.5", ',').unwrap(), "1,234.5");
    }
}
