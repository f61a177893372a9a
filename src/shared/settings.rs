use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::core::catalog;
use crate::shared::errors::{SettingsError, SettingsResult};

/// Number of history entries kept by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Upper bound for `max_fraction_digits`; f64 carries ~16 significant digits
const MAX_FRACTION_DIGITS_LIMIT: usize = 16;

/// Tunables for the conversion engine.
///
/// Deserializes from partial JSON: missing keys take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings.ts")]
pub struct EngineSettings {
    #[ts(type = "number")]
    pub history_capacity: usize,
    #[ts(type = "number")]
    pub max_fraction_digits: usize,
    pub grouping_threshold: f64,
    pub thousands_separator: char,
    pub custom_from_placeholder: String,
    pub custom_to_placeholder: String,
    pub default_category: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_fraction_digits: 8,
            grouping_threshold: 1000.0,
            thousands_separator: ',',
            custom_from_placeholder: "Unit A".to_string(),
            custom_to_placeholder: "Unit B".to_string(),
            default_category: "length".to_string(),
        }
    }
}

impl EngineSettings {
    /// Parse settings supplied by the host and validate them
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.history_capacity == 0 {
            return Err(invalid("history_capacity", "must be at least 1"));
        }
        if self.max_fraction_digits > MAX_FRACTION_DIGITS_LIMIT {
            return Err(invalid(
                "max_fraction_digits",
                format!("must be at most {}", MAX_FRACTION_DIGITS_LIMIT),
            ));
        }
        if !self.grouping_threshold.is_finite() || self.grouping_threshold <= 0.0 {
            return Err(invalid("grouping_threshold", "must be a positive finite number"));
        }

        let sep = self.thousands_separator;
        if sep.is_ascii_digit() || sep.is_whitespace() || matches!(sep, '.' | '-' | '+') {
            return Err(invalid(
                "thousands_separator",
                format!("'{}' would make formatted results unparseable", sep),
            ));
        }

        if catalog::lookup(&self.default_category).is_none() {
            return Err(invalid(
                "default_category",
                format!("unknown category '{}'", self.default_category),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::InvalidValue { field, reason: reason.into() }
}
