use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Rich catalog Data Transfer Objects for frontend
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct CategoryDTO {
    pub id: String,    // Category key (e.g., "length", "custom")
    pub label: String, // Display name (e.g., "Length")
    pub icon: String,  // Icon name for the tab
    pub rules: Vec<RuleDTO>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct RuleDTO {
    #[ts(type = "number")]
    pub index: usize,
    pub from: String,
    pub to: String,
    pub linear: bool,
}

/// What the result field shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "state", content = "text")]
#[ts(export, export_to = "bindings.ts")]
pub enum ResultDisplay {
    /// Empty or unparseable input; nothing to show
    Blank,
    /// Formatted number
    Value(String),
    /// Short human-readable error in place of a number
    Error(String),
}

impl ResultDisplay {
    /// Text for the result field ("" when blank)
    pub fn text(&self) -> &str {
        match self {
            ResultDisplay::Blank => "",
            ResultDisplay::Value(text) | ResultDisplay::Error(text) => text,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, ResultDisplay::Value(_))
    }
}

/// A single past successful conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct ConversionHistoryEntry {
    /// Monotonically increasing; higher ids are newer
    #[ts(type = "number")]
    pub id: u64,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
    pub input_value: String,
    pub input_unit: String,
    pub result_value: String,
    pub output_unit: String,
    pub category_label: String,
}

/// Everything the screen renders after a recompute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct DisplayModel {
    pub category_id: String,
    pub category_label: String,
    pub input_text: String,
    pub input_unit: String,
    pub output_unit: String,
    pub result: ResultDisplay,
    pub swapped: bool,
    pub swap_disabled: bool,
    pub history: Vec<ConversionHistoryEntry>,
}

/// Quantity found in free text, mapped onto a catalog rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct DetectedQuantity {
    pub amount_text: String,
    pub unit: String,
    pub category_id: String,
    #[ts(type = "number")]
    pub rule_index: usize,
}
