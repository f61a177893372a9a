//! Converter screen state
//!
//! Owns the selection, the swap flag, the raw input text and the history for
//! one screen instance. Every event mutates state and then recomputes:
//! `compute_view` builds the display model without side effects, and a
//! successful conversion is recorded in the history.

use tracing::{debug, warn};

use crate::core::catalog::{self, CUSTOM_CATEGORY_ID};
use crate::core::converter::{
    self, parsing, ConversionOutcome, CustomDefinition, Selection, SelectionState,
};
use crate::core::history::{ConversionHistory, HistoryRecord};
use crate::shared::errors::{EngineResult, SwapRejected};
use crate::shared::settings::EngineSettings;
use crate::shared::types::{DisplayModel, ResultDisplay};

#[derive(Debug)]
pub struct ConverterScreen {
    settings: EngineSettings,
    state: SelectionState,
    /// Custom definition kept while a catalog category is active
    stashed_custom: CustomDefinition,
    input: String,
    history: ConversionHistory,
}

impl ConverterScreen {
    /// Build a screen from settings, rejecting values `validate` refuses
    pub fn new(settings: EngineSettings) -> EngineResult<Self> {
        let history = ConversionHistory::new(settings.history_capacity);
        Self::with_history(settings, history)
    }

    /// Use a caller-supplied history (e.g. one backed by a persistent store)
    pub fn with_history(settings: EngineSettings, history: ConversionHistory) -> EngineResult<Self> {
        if let Err(e) = settings.validate() {
            warn!("[ConverterScreen] Rejected settings: {}", e);
            return Err(e.into());
        }
        Ok(Self::build(settings, history))
    }

    fn build(settings: EngineSettings, history: ConversionHistory) -> Self {
        let state = if settings.default_category == CUSTOM_CATEGORY_ID {
            SelectionState::custom(CustomDefinition::default())
        } else {
            SelectionState::catalog(settings.default_category.clone(), 0)
        };
        Self {
            settings,
            state,
            stashed_custom: CustomDefinition::default(),
            input: String::new(),
            history,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn selection(&self) -> &SelectionState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &ConversionHistory {
        &self.history
    }

    /// Switch category; resets to its first rule and clears the swap flag
    pub fn select_category(&mut self, category_id: &str) -> DisplayModel {
        if let Selection::Custom(custom) = &self.state.selection {
            self.stashed_custom = custom.clone();
        }
        self.state = if category_id == CUSTOM_CATEGORY_ID {
            SelectionState::custom(self.stashed_custom.clone())
        } else {
            SelectionState::catalog(category_id, 0)
        };
        debug!("[ConverterScreen] Category -> {}", category_id);
        self.recompute()
    }

    /// Pick a rule within the active catalog category. Ignored in custom mode.
    pub fn select_rule(&mut self, index: usize) -> DisplayModel {
        if let Selection::Catalog { rule_index, .. } = &mut self.state.selection {
            *rule_index = index;
            self.state.swapped = false;
        }
        self.recompute()
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> DisplayModel {
        self.input = text.into();
        self.recompute()
    }

    pub fn set_custom_from(&mut self, name: impl Into<String>) -> DisplayModel {
        let name = name.into();
        self.edit_custom(|custom| custom.from = name)
    }

    pub fn set_custom_to(&mut self, name: impl Into<String>) -> DisplayModel {
        let name = name.into();
        self.edit_custom(|custom| custom.to = name)
    }

    pub fn set_custom_factor(&mut self, factor_text: impl Into<String>) -> DisplayModel {
        let factor_text = factor_text.into();
        self.edit_custom(|custom| custom.factor_text = factor_text)
    }

    fn edit_custom(&mut self, edit: impl FnOnce(&mut CustomDefinition)) -> DisplayModel {
        match &mut self.state.selection {
            Selection::Custom(custom) => edit(custom),
            Selection::Catalog { .. } => edit(&mut self.stashed_custom),
        }
        self.recompute()
    }

    /// Flip direction. The current result becomes the new input so the
    /// fields trade places; the previous input is discarded.
    pub fn swap(&mut self) -> Result<DisplayModel, SwapRejected> {
        let rule = converter::resolve_active_rule(&self.state, &self.settings);
        if let Err(rejected) = converter::check_swap(rule.as_deref(), &self.state) {
            warn!("[ConverterScreen] Swap rejected: {}", rejected);
            return Err(rejected);
        }

        let previous = self.compute_view().result;
        self.state.swapped = !self.state.swapped;
        // Error text is not a value; start from an empty field instead
        self.input = match previous {
            ResultDisplay::Value(text) => text,
            ResultDisplay::Blank | ResultDisplay::Error(_) => String::new(),
        };
        debug!("[ConverterScreen] Swapped -> {}", self.state.swapped);
        Ok(self.recompute())
    }

    pub fn clear_history(&mut self) -> DisplayModel {
        self.history.clear();
        self.compute_view()
    }

    /// Pre-fill from free text such as "12 km". Returns false, leaving the
    /// screen untouched, when no known quantity is found.
    pub fn apply_text(&mut self, text: &str) -> bool {
        let Some(detected) = parsing::detect_quantity(text) else {
            return false;
        };
        if let Selection::Custom(custom) = &self.state.selection {
            self.stashed_custom = custom.clone();
        }
        self.state = SelectionState::catalog(detected.category_id, detected.rule_index);
        self.input = detected.amount_text;
        self.recompute();
        true
    }

    /// Whether the swap control should be disabled
    pub fn swap_disabled(&self) -> bool {
        let rule = converter::resolve_active_rule(&self.state, &self.settings);
        converter::check_swap(rule.as_deref(), &self.state).is_err()
    }

    /// Display model for the current state. No side effects.
    pub fn compute_view(&self) -> DisplayModel {
        self.evaluate().0
    }

    /// Recompute the view and record a successful conversion
    pub fn recompute(&mut self) -> DisplayModel {
        let (mut view, record) = self.evaluate();
        match record {
            Some(record) => {
                if self.history.record(record).is_some() {
                    view.history = self.history.entries().to_vec();
                }
            }
            // Blank, error or no rule: the next success is a new conversion
            None => self.history.forget_last(),
        }
        view
    }

    fn evaluate(&self) -> (DisplayModel, Option<HistoryRecord>) {
        let category_id = self.state.selection.category_id().to_string();
        let swap_disabled = self.swap_disabled();
        let history = self.history.entries().to_vec();

        let Some(rule) = converter::resolve_active_rule(&self.state, &self.settings) else {
            let view = DisplayModel {
                category_label: catalog::lookup(&category_id)
                    .map(|c| c.label.to_string())
                    .unwrap_or_default(),
                category_id,
                input_text: self.input.clone(),
                input_unit: String::new(),
                output_unit: String::new(),
                result: ResultDisplay::Blank,
                swapped: self.state.swapped,
                swap_disabled,
                history,
            };
            return (view, None);
        };

        let (input_unit, output_unit) = converter::resolve_display_units(&rule, &self.state);
        let category_label = converter::category_label(&rule, &self.state);
        let outcome = converter::convert(&self.input, &rule, &self.state, &self.settings);

        let record = match &outcome {
            ConversionOutcome::Converted { formatted, .. } => Some(HistoryRecord {
                input_value: self.input.trim().to_string(),
                input_unit: input_unit.clone(),
                result_value: formatted.clone(),
                output_unit: output_unit.clone(),
                category_label: category_label.clone(),
            }),
            ConversionOutcome::NoValue | ConversionOutcome::Failed(_) => None,
        };

        let view = DisplayModel {
            category_id,
            category_label,
            input_text: self.input.clone(),
            input_unit,
            output_unit,
            result: outcome.to_display(),
            swapped: self.state.swapped,
            swap_disabled,
            history,
        };
        (view, record)
    }
}

impl Default for ConverterScreen {
    fn default() -> Self {
        let settings = EngineSettings::default();
        let history = ConversionHistory::new(settings.history_capacity);
        Self::build(settings, history)
    }
}
