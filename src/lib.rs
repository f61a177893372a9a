//! Unit conversion engine for a converter screen.
//!
//! The presentation layer feeds events (category, rule, input text, swap,
//! custom unit edits) into a [`ConverterScreen`] and renders the
//! [`DisplayModel`] it returns. Everything runs synchronously; logging goes
//! through `tracing` and the host installs the subscriber.

pub mod core;
pub mod shared;

pub use crate::core::catalog::{list_categories, lookup, rule_at, ConversionCategory, ConversionRule, RuleKind};
pub use crate::core::converter::{
    convert, resolve_active_rule, resolve_display_units, ConversionOutcome, CustomDefinition, Selection,
    SelectionState,
};
pub use crate::core::converter::parsing::detect_quantity;
pub use crate::core::history::{ConversionHistory, HistoryStore, InMemoryStore};
pub use crate::core::screen::ConverterScreen;
pub use crate::shared::settings::EngineSettings;
pub use crate::shared::types::{ConversionHistoryEntry, DisplayModel, ResultDisplay};
pub use crate::shared::{ConversionError, EngineError, EngineResult, SettingsError, SwapRejected};
