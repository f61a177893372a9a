//! Conversion engine
//!
//! Resolves the active rule from the selection, computes and formats the
//! converted value. Every failure is recovered into a `ConversionOutcome`;
//! nothing here panics or returns an error to the caller.

pub mod format;
pub mod parsing;

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::core::catalog::{self, ConversionRule, RuleKind, CUSTOM_CATEGORY_ID};
use crate::shared::errors::{ConversionError, SwapRejected};
use crate::shared::settings::EngineSettings;
use crate::shared::types::ResultDisplay;

use self::format::format_number;
use self::parsing::{parse_input, ParsedInput};

/// User-defined linear conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomDefinition {
    pub from: String,
    pub to: String,
    /// Raw factor text as typed
    pub factor_text: String,
}

impl CustomDefinition {
    /// Factor as a number; empty, unparseable or non-finite text is 0
    pub fn parsed_factor(&self) -> f64 {
        match self.factor_text.trim().parse::<f64>() {
            Ok(factor) if factor.is_finite() => factor,
            _ => 0.0,
        }
    }

    fn from_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        non_empty_or(&self.from, placeholder)
    }

    fn to_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        non_empty_or(&self.to, placeholder)
    }
}

fn non_empty_or<'a>(name: &'a str, placeholder: &'a str) -> &'a str {
    if name.trim().is_empty() {
        placeholder
    } else {
        name.trim()
    }
}

/// Which conversion is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Catalog { category_id: String, rule_index: usize },
    Custom(CustomDefinition),
}

impl Selection {
    pub fn category_id(&self) -> &str {
        match self {
            Selection::Catalog { category_id, .. } => category_id,
            Selection::Custom(_) => CUSTOM_CATEGORY_ID,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Selection::Custom(_))
    }
}

/// Cursor over the catalog plus the direction flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selection: Selection,
    /// Direction flip; has no effect on non-linear rules
    pub swapped: bool,
}

impl SelectionState {
    pub fn catalog(category_id: impl Into<String>, rule_index: usize) -> Self {
        Self {
            selection: Selection::Catalog { category_id: category_id.into(), rule_index },
            swapped: false,
        }
    }

    pub fn custom(definition: CustomDefinition) -> Self {
        Self { selection: Selection::Custom(definition), swapped: false }
    }
}

/// Result of one conversion attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    /// Nothing to show; not an error
    NoValue,
    Converted { value: f64, formatted: String },
    Failed(ConversionError),
}

impl ConversionOutcome {
    pub fn to_display(&self) -> ResultDisplay {
        match self {
            ConversionOutcome::NoValue => ResultDisplay::Blank,
            ConversionOutcome::Converted { formatted, .. } => ResultDisplay::Value(formatted.clone()),
            ConversionOutcome::Failed(err) => ResultDisplay::Error(err.to_string()),
        }
    }
}

/// Rule for the current selection. Custom mode synthesizes a linear rule;
/// an unknown category or out-of-range index yields `None`.
pub fn resolve_active_rule(
    state: &SelectionState,
    settings: &EngineSettings,
) -> Option<Cow<'static, ConversionRule>> {
    match &state.selection {
        Selection::Custom(custom) => Some(Cow::Owned(ConversionRule::linear(
            custom.from_or(&settings.custom_from_placeholder),
            custom.to_or(&settings.custom_to_placeholder),
            custom.parsed_factor(),
        ))),
        Selection::Catalog { category_id, rule_index } => {
            let category = catalog::lookup(category_id)?;
            catalog::rule_at(category, *rule_index).map(Cow::Borrowed)
        }
    }
}

/// Unit names for the input and output fields
pub fn resolve_display_units(rule: &ConversionRule, state: &SelectionState) -> (String, String) {
    match rule.kind {
        RuleKind::NonLinear { .. } => (rule.from.clone(), rule.to.clone()),
        RuleKind::Linear { .. } if state.swapped => (rule.to.clone(), rule.from.clone()),
        RuleKind::Linear { .. } => (rule.from.clone(), rule.to.clone()),
    }
}

/// Label stored with history entries
pub fn category_label(rule: &ConversionRule, state: &SelectionState) -> String {
    match &state.selection {
        Selection::Custom(_) => format!("Custom: {} ↔ {}", rule.from, rule.to),
        Selection::Catalog { category_id, .. } => catalog::lookup(category_id)
            .map(|c| c.label.to_string())
            .unwrap_or_else(|| category_id.clone()),
    }
}

/// Whether swapping is allowed for this rule and selection
pub fn check_swap(rule: Option<&ConversionRule>, state: &SelectionState) -> Result<(), SwapRejected> {
    let rule = rule.ok_or(SwapRejected::NoActiveRule)?;
    match rule.kind {
        RuleKind::NonLinear { .. } => Err(SwapRejected::NonLinear),
        RuleKind::Linear { factor } if state.selection.is_custom() && factor == 0.0 => {
            Err(SwapRejected::ZeroFactor)
        }
        RuleKind::Linear { .. } => Ok(()),
    }
}

/// Convert raw input text under `rule`
pub fn convert(
    raw_input: &str,
    rule: &ConversionRule,
    state: &SelectionState,
    settings: &EngineSettings,
) -> ConversionOutcome {
    let value = match parse_input(raw_input, settings.thousands_separator) {
        ParsedInput::NoValue => return ConversionOutcome::NoValue,
        ParsedInput::NonFinite => return ConversionOutcome::Failed(ConversionError::NonFinite),
        ParsedInput::Number(value) => value,
    };

    let converted = match compute(value, rule, state) {
        Ok(converted) => converted,
        Err(err) => {
            debug!("[convert] {} {} -> {}: {}", raw_input.trim(), rule.from, rule.to, err);
            return ConversionOutcome::Failed(err);
        }
    };

    let formatted = format_number(converted, settings);
    debug!("[convert] {} {} -> {} {}", raw_input.trim(), rule.from, formatted, rule.to);
    ConversionOutcome::Converted { value: converted, formatted }
}

fn compute(value: f64, rule: &ConversionRule, state: &SelectionState) -> Result<f64, ConversionError> {
    let converted = match rule.kind {
        RuleKind::NonLinear { formula } => {
            panic::catch_unwind(AssertUnwindSafe(|| formula(value))).map_err(|_| {
                warn!("[convert] Formula {} -> {} panicked", rule.from, rule.to);
                ConversionError::Unexpected
            })?
        }
        RuleKind::Linear { factor } if factor == 0.0 && state.selection.is_custom() => {
            return Err(ConversionError::ZeroFactor);
        }
        RuleKind::Linear { factor } if factor == 0.0 || !factor.is_finite() => {
            return Err(ConversionError::MalformedRule);
        }
        RuleKind::Linear { factor } if state.swapped => value / factor,
        RuleKind::Linear { factor } => value * factor,
    };

    if converted.is_finite() {
        Ok(converted)
    } else {
        Err(ConversionError::NonFinite)
    }
}
