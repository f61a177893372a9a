//! Input parsing
//!
//! `parse_input` turns the raw text of the input field into a number.
//! `detect_quantity` extracts an amount and unit from free text (e.g. a
//! pasted "12 km") and maps it onto a catalog rule.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::catalog;
use crate::shared::types::DetectedQuantity;

/// Outcome of parsing the input field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedInput {
    /// Empty, a bare "-", or not a number
    NoValue,
    /// A number that overflowed to infinity
    NonFinite,
    Number(f64),
}

/// Parse trimmed input. A correctly grouped integer part ("3,280.84") is
/// accepted so a formatted result fed back as input (after a swap) parses
/// again; misplaced separators and spelled-out infinities are not numbers.
pub fn parse_input(raw: &str, thousands_separator: char) -> ParsedInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return ParsedInput::NoValue;
    }
    // Only the exponent marker may be alphabetic ("inf", "NaN" are rejected)
    if trimmed.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
        return ParsedInput::NoValue;
    }

    let cleaned = if trimmed.contains(thousands_separator) {
        match strip_grouping(trimmed, thousands_separator) {
            Some(cleaned) => cleaned,
            None => {
                debug!("[parse_input] Misplaced separator in '{}'", trimmed);
                return ParsedInput::NoValue;
            }
        }
    } else {
        trimmed.to_string()
    };

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_nan() => ParsedInput::NoValue,
        Ok(value) if value.is_infinite() => ParsedInput::NonFinite,
        Ok(value) => ParsedInput::Number(value),
        Err(_) => ParsedInput::NoValue,
    }
}

/// Remove separators from the integer part when they sit every three digits.
/// Returns `None` for any other placement, or a separator in the fraction.
fn strip_grouping(text: &str, separator: char) -> Option<String> {
    let (sign, unsigned) = match text.strip_prefix(|c: char| c == '-' || c == '+') {
        Some(rest) => (&text[..1], rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    if fraction.is_some_and(|f| f.contains(separator)) {
        return None;
    }

    let mut digits = String::with_capacity(text.len());
    digits.push_str(sign);
    for (i, group) in integer.split(separator).enumerate() {
        let well_formed = if i == 0 {
            (1..=3).contains(&group.len())
        } else {
            group.len() == 3
        };
        if !well_formed || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }
    Some(digits)
}

// Unit aliases mapped to catalog display names
fn normalize_unit(unit: &str) -> Option<&'static str> {
    let unit_lower = unit.trim().to_lowercase();
    match unit_lower.as_str() {
        // Length
        "m" | "meter" | "meters" | "metre" | "metres" => Some("Meters"),
        "ft" | "foot" | "feet" | "'" => Some("Feet"),
        "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Some("Kilometers"),
        "mi" | "mile" | "miles" => Some("Miles"),
        "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => Some("Centimeters"),
        "in" | "inch" | "inches" | "\"" => Some("Inches"),
        "yd" | "yard" | "yards" => Some("Yards"),
        // Mass
        "kg" | "kilogram" | "kilograms" => Some("Kilograms"),
        "lb" | "lbs" | "pound" | "pounds" => Some("Pounds"),
        "g" | "gram" | "grams" => Some("Grams"),
        "oz" | "ounce" | "ounces" => Some("Ounces"),
        "t" | "tonne" | "tonnes" | "metric ton" | "metric tons" => Some("Metric Tons"),
        // Temperature
        "c" | "°c" | "celsius" => Some("Celsius"),
        "f" | "°f" | "fahrenheit" => Some("Fahrenheit"),
        "k" | "kelvin" => Some("Kelvin"),
        // Volume
        "l" | "liter" | "liters" | "litre" | "litres" => Some("Liters"),
        "gal" | "gallon" | "gallons" => Some("Gallons"),
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some("Milliliters"),
        "fl-oz" | "floz" | "fluid ounce" | "fluid ounces" => Some("Fluid Ounces"),
        "cup" | "cups" => Some("Cups"),
        // Area
        "m2" | "m²" | "sq m" | "square meter" | "square meters" => Some("Square Meters"),
        "ft2" | "ft²" | "sq ft" | "square foot" | "square feet" => Some("Square Feet"),
        "ha" | "hectare" | "hectares" => Some("Hectares"),
        "ac" | "acre" | "acres" => Some("Acres"),
        "km2" | "km²" | "sq km" | "square kilometer" | "square kilometers" => Some("Square Kilometers"),
        "mi2" | "mi²" | "sq mi" | "square mile" | "square miles" => Some("Square Miles"),
        // Time
        "h" | "hr" | "hrs" | "hour" | "hours" => Some("Hours"),
        "min" | "mins" | "minute" | "minutes" => Some("Minutes"),
        "s" | "sec" | "secs" | "second" | "seconds" => Some("Seconds"),
        "d" | "day" | "days" => Some("Days"),
        "wk" | "week" | "weeks" => Some("Weeks"),
        _ => None,
    }
}

// Compile regex patterns once (constant patterns, cannot fail)
static RE_NUMBER_THEN_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([+-]?\d+(?:\.\d+)?)\s*([a-zA-Z°'″²\x22-]+[23]?(?:\s+[a-zA-Z]+)?)")
        .expect("number-then-unit pattern")
});

static RE_UNIT_THEN_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z°²-]+)\s*([+-]?\d+(?:\.\d+)?)")
        .expect("unit-then-number pattern")
});

/// Extract the first amount/unit pair from `text` and find the catalog rule
/// that converts from that unit. Commas are treated as grouping separators.
pub fn detect_quantity(text: &str) -> Option<DetectedQuantity> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let normalized = text.replace(',', "");

    let candidate = RE_NUMBER_THEN_UNIT
        .captures(&normalized)
        .and_then(|caps| {
            let amount = caps.get(1)?.as_str();
            let unit = caps.get(2)?.as_str();
            // "3.5 square meters" first, then just the first word
            normalize_unit(unit)
                .or_else(|| unit.split_whitespace().next().and_then(normalize_unit))
                .map(|u| (amount.to_string(), u))
        })
        .or_else(|| {
            RE_UNIT_THEN_NUMBER.captures(&normalized).and_then(|caps| {
                let unit = normalize_unit(caps.get(1)?.as_str())?;
                Some((caps.get(2)?.as_str().to_string(), unit))
            })
        });

    let Some((amount_text, unit)) = candidate else {
        debug!("[detect_quantity] No quantity in '{}'", text);
        return None;
    };

    let (category, rule_index) = catalog::find_rule_from(unit)?;
    debug!(
        "[detect_quantity] Extracted {} {} from '{}' ({} rule {})",
        amount_text, unit, text, category.id, rule_index
    );

    Some(DetectedQuantity {
        amount_text,
        unit: unit.to_string(),
        category_id: category.id.to_string(),
        rule_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_inputs() {
        assert_eq!(parse_input("", ','), ParsedInput::NoValue);
        assert_eq!(parse_input("   ", ','), ParsedInput::NoValue);
        assert_eq!(parse_input("-", ','), ParsedInput::NoValue);
        assert_eq!(parse_input(" - ", ','), ParsedInput::NoValue);
    }

    #[test]
    fn test_parse_non_numeric() {
        assert_eq!(parse_input("abc", ','), ParsedInput::NoValue);
        assert_eq!(parse_input("12abc", ','), ParsedInput::NoValue);
        assert_eq!(parse_input(".", ','), ParsedInput::NoValue);
        assert_eq!(parse_input("NaN", ','), ParsedInput::NoValue);
    }

    #[test]
    fn test_parse_spelled_infinity_is_not_a_number() {
        for raw in ["inf", "-inf", "Infinity", "+infinity", "INF"] {
            assert_eq!(parse_input(raw, ','), ParsedInput::NoValue, "input {:?}", raw);
        }
        assert_eq!(parse_input("2.5e3", ','), ParsedInput::Number(2500.0));
    }

    #[test]
    fn test_parse_overflow_is_non_finite() {
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(parse_input(&huge, ','), ParsedInput::NonFinite);
        assert_eq!(parse_input("1e400", ','), ParsedInput::NonFinite);
        assert_eq!(parse_input("-1e400", ','), ParsedInput::NonFinite);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_input(" 5 ", ','), ParsedInput::Number(5.0));
        assert_eq!(parse_input("-2.5", ','), ParsedInput::Number(-2.5));
        assert_eq!(parse_input(".5", ','), ParsedInput::Number(0.5));
    }

    #[test]
    fn test_parse_grouped_number() {
        assert_eq!(parse_input("3,280.84", ','), ParsedInput::Number(3280.84));
        assert_eq!(parse_input("1'000", '\''), ParsedInput::Number(1000.0));
        assert_eq!(parse_input("1,234,567", ','), ParsedInput::Number(1_234_567.0));
        assert_eq!(parse_input("-12,345.5", ','), ParsedInput::Number(-12_345.5));
    }

    #[test]
    fn test_parse_misplaced_separator() {
        for raw in ["1,2,3", "12,34", ",123", "1,234,", "1,0000", "1.234,5", "-,100"] {
            assert_eq!(parse_input(raw, ','), ParsedInput::NoValue, "input {:?}", raw);
        }
    }

    #[test]
    fn test_detect_number_then_symbol() {
        let detected = detect_quantity("12 km").unwrap();
        assert_eq!(detected.amount_text, "12");
        assert_eq!(detected.unit, "Kilometers");
        assert_eq!(detected.category_id, "length");
        assert_eq!(detected.rule_index, 2);
    }

    #[test]
    fn test_detect_word_units_and_spelling() {
        let detected = detect_quantity("It is 3.5 metres long").unwrap();
        assert_eq!(detected.amount_text, "3.5");
        assert_eq!(detected.unit, "Meters");
        assert_eq!(detected.rule_index, 0);
    }

    #[test]
    fn test_detect_multi_word_unit() {
        let detected = detect_quantity("40 square meters").unwrap();
        assert_eq!(detected.unit, "Square Meters");
        assert_eq!(detected.category_id, "area");
    }

    #[test]
    fn test_detect_square_unit_symbols() {
        let detected = detect_quantity("40 m2").unwrap();
        assert_eq!(detected.amount_text, "40");
        assert_eq!(detected.unit, "Square Meters");
        assert_eq!(detected.category_id, "area");
        assert_eq!(detected.rule_index, 0);

        let detected = detect_quantity("a plot of 5 km2 nearby").unwrap();
        assert_eq!(detected.unit, "Square Kilometers");
        assert_eq!(detected.category_id, "area");
        assert_eq!(detected.rule_index, 4);

        assert_eq!(detect_quantity("12 ft²").unwrap().unit, "Square Feet");
    }

    #[test]
    fn test_detect_temperature() {
        let detected = detect_quantity("100°F").unwrap();
        assert_eq!(detected.unit, "Fahrenheit");
        assert_eq!(detected.category_id, "temperature");
        assert_eq!(detected.rule_index, 1);
    }

    #[test]
    fn test_detect_unit_then_number() {
        let detected = detect_quantity("kg 70").unwrap();
        assert_eq!(detected.amount_text, "70");
        assert_eq!(detected.unit, "Kilograms");
    }

    #[test]
    fn test_detect_grouped_amount() {
        assert_eq!(detect_quantity("1,500 ft").unwrap().amount_text, "1500");
    }

    #[test]
    fn test_detect_nothing() {
        assert!(detect_quantity("").is_none());
        assert!(detect_quantity("hello world").is_none());
        assert!(detect_quantity("12 parsecs").is_none());
    }
}
