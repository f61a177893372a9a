//! Unit catalog
//!
//! Static, process-wide table of conversion categories. Each category holds an
//! ordered list of directed rules; the order is the tab display order and the
//! first rule is the initial selection. Linear pairs are stored as two explicit
//! rules (factor and its reciprocal). Temperature stores one formula per
//! directed pair since the inverse is a different formula.

use once_cell::sync::Lazy;

use crate::shared::types::{CategoryDTO, RuleDTO};

/// Id of the reserved category whose rule is synthesized from user input
pub const CUSTOM_CATEGORY_ID: &str = "custom";

/// How a rule maps an input value to an output value
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// `to = from * factor`
    Linear { factor: f64 },
    /// Non-linear relationship, valid in one direction only
    NonLinear { formula: fn(f64) -> f64 },
}

/// One directed unit pair
#[derive(Debug, Clone)]
pub struct ConversionRule {
    pub from: String,
    pub to: String,
    pub kind: RuleKind,
}

impl ConversionRule {
    pub fn linear(from: impl Into<String>, to: impl Into<String>, factor: f64) -> Self {
        Self { from: from.into(), to: to.into(), kind: RuleKind::Linear { factor } }
    }

    pub fn non_linear(from: impl Into<String>, to: impl Into<String>, formula: fn(f64) -> f64) -> Self {
        Self { from: from.into(), to: to.into(), kind: RuleKind::NonLinear { formula } }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self.kind, RuleKind::Linear { .. })
    }

    pub fn factor(&self) -> Option<f64> {
        match self.kind {
            RuleKind::Linear { factor } => Some(factor),
            RuleKind::NonLinear { .. } => None,
        }
    }
}

/// A named, iconified group of rules for one physical quantity
#[derive(Debug, Clone)]
pub struct ConversionCategory {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub rules: Vec<ConversionRule>,
}

impl ConversionCategory {
    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_CATEGORY_ID
    }
}

// Temperature formulas
fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}

fn kelvin_to_celsius(k: f64) -> f64 {
    k - 273.15
}

fn fahrenheit_to_kelvin(f: f64) -> f64 {
    celsius_to_kelvin(fahrenheit_to_celsius(f))
}

fn kelvin_to_fahrenheit(k: f64) -> f64 {
    celsius_to_fahrenheit(kelvin_to_celsius(k))
}

/// Both directions of a linear relationship; the reverse factor is the exact reciprocal
fn pair(from: &str, to: &str, factor: f64) -> [ConversionRule; 2] {
    [
        ConversionRule::linear(from, to, factor),
        ConversionRule::linear(to, from, 1.0 / factor),
    ]
}

fn pairs(list: &[(&str, &str, f64)]) -> Vec<ConversionRule> {
    list.iter()
        .flat_map(|&(from, to, factor)| pair(from, to, factor))
        .collect()
}

/// Thread-safe catalog initialized once on first use
static CATALOG: Lazy<Vec<ConversionCategory>> = Lazy::new(|| {
    vec![
        ConversionCategory {
            id: "length",
            label: "Length",
            icon: "ruler",
            rules: pairs(&[
                ("Meters", "Feet", 3.28084),
                ("Kilometers", "Miles", 0.621371),
                ("Centimeters", "Inches", 0.393701),
                ("Meters", "Yards", 1.09361),
            ]),
        },
        ConversionCategory {
            id: "mass",
            label: "Mass",
            icon: "scale",
            rules: pairs(&[
                ("Kilograms", "Pounds", 2.20462),
                ("Grams", "Ounces", 0.035274),
                ("Metric Tons", "Short Tons", 1.10231),
            ]),
        },
        ConversionCategory {
            id: "temperature",
            label: "Temperature",
            icon: "thermometer",
            rules: vec![
                ConversionRule::non_linear("Celsius", "Fahrenheit", celsius_to_fahrenheit),
                ConversionRule::non_linear("Fahrenheit", "Celsius", fahrenheit_to_celsius),
                ConversionRule::non_linear("Celsius", "Kelvin", celsius_to_kelvin),
                ConversionRule::non_linear("Kelvin", "Celsius", kelvin_to_celsius),
                ConversionRule::non_linear("Fahrenheit", "Kelvin", fahrenheit_to_kelvin),
                ConversionRule::non_linear("Kelvin", "Fahrenheit", kelvin_to_fahrenheit),
            ],
        },
        ConversionCategory {
            id: "volume",
            label: "Volume",
            icon: "beaker",
            rules: pairs(&[
                ("Liters", "Gallons", 0.264172),
                ("Milliliters", "Fluid Ounces", 0.033814),
                ("Liters", "Cups", 4.22675),
            ]),
        },
        ConversionCategory {
            id: "area",
            label: "Area",
            icon: "square",
            rules: pairs(&[
                ("Square Meters", "Square Feet", 10.7639),
                ("Hectares", "Acres", 2.47105),
                ("Square Kilometers", "Square Miles", 0.386102),
            ]),
        },
        ConversionCategory {
            id: "time",
            label: "Time",
            icon: "clock",
            rules: pairs(&[
                ("Hours", "Minutes", 60.0),
                ("Minutes", "Seconds", 60.0),
                ("Days", "Hours", 24.0),
                ("Weeks", "Days", 7.0),
            ]),
        },
        ConversionCategory {
            id: CUSTOM_CATEGORY_ID,
            label: "Custom",
            icon: "pencil",
            rules: Vec::new(),
        },
    ]
});

/// All categories in display order
pub fn categories() -> &'static [ConversionCategory] {
    &CATALOG
}

/// Find a category by id. Absence means "no active conversion", not an error.
pub fn lookup(category_id: &str) -> Option<&'static ConversionCategory> {
    CATALOG.iter().find(|c| c.id == category_id)
}

pub fn rule_at(category: &ConversionCategory, index: usize) -> Option<&ConversionRule> {
    category.rules.get(index)
}

/// Find the first rule (in catalog order) that converts from the given unit
pub fn find_rule_from(unit: &str) -> Option<(&'static ConversionCategory, usize)> {
    CATALOG.iter().find_map(|category| {
        category.rules
            .iter()
            .position(|rule| rule.from.eq_ignore_ascii_case(unit))
            .map(|index| (category, index))
    })
}

/// Catalog listing for the presentation layer (tabs and unit pickers)
pub fn list_categories() -> Vec<CategoryDTO> {
    CATALOG
        .iter()
        .map(|category| CategoryDTO {
            id: category.id.to_string(),
            label: category.label.to_string(),
            icon: category.icon.to_string(),
            rules: category.rules
                .iter()
                .enumerate()
                .map(|(index, rule)| RuleDTO {
                    index,
                    from: rule.from.clone(),
                    to: rule.to.clone(),
                    linear: rule.is_linear(),
                })
                .collect(),
        })
        .collect()
}
