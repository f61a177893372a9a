//! Error types for the conversion engine
//!
//! Every variant is recovered locally: conversion errors become the text shown
//! in the result field, swap rejections become an advisory for the user.
//! All errors are serializable for IPC communication with the frontend.

use thiserror::Error;
use serde::Serialize;

/// Conversion failures that replace the numeric result with a short message.
///
/// The `Display` text of each variant is exactly what the result field shows.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum ConversionError {
    /// Input parsed but overflowed to infinity, or the computed value did
    #[error("Error")]
    NonFinite,

    /// Custom mode with a factor that parses to exactly zero
    #[error("Factor must be non-zero")]
    ZeroFactor,

    /// Catalog rule with no usable factor or formula
    #[error("Error: No formula/factor")]
    MalformedRule,

    /// Anything else that went wrong while computing
    #[error("Error")]
    Unexpected,
}

/// Reasons a swap request is refused. State is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum SwapRejected {
    #[error("cannot swap non-linear units")]
    NonLinear,

    #[error("cannot swap zero factor")]
    ZeroFactor,

    #[error("no active conversion")]
    NoActiveRule,
}

/// Invalid engine configuration
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum SettingsError {
    /// JSON could not be parsed into settings
    #[error("Invalid settings JSON: {0}")]
    Parse(String),

    /// A field holds a value the engine cannot work with
    #[error("Invalid setting '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err.to_string())
    }
}

/// Internal failure while grouping digits. Never leaves the formatter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormatError {
    #[error("unexpected character '{0}' in integer part")]
    NonDigit(char),

    #[error("empty integer part")]
    Empty,
}

/// Errors surfaced by the engine's fallible entry points
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "error")]
pub enum EngineError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Swap(#[from] SwapRejected),
}

// Helper type alias for settings results
pub type SettingsResult<T> = Result<T, SettingsError>;

// Helper type alias for engine results
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_display_matches_result_field() {
        assert_eq!(ConversionError::NonFinite.to_string(), "Error");
        assert_eq!(ConversionError::ZeroFactor.to_string(), "Factor must be non-zero");
        assert_eq!(ConversionError::MalformedRule.to_string(), "Error: No formula/factor");
        assert_eq!(ConversionError::Unexpected.to_string(), "Error");
    }

    #[test]
    fn test_swap_rejected_serializes_tagged() {
        let json = serde_json::to_value(SwapRejected::NonLinear).unwrap();
        assert_eq!(json["type"], "NonLinear");
    }

    #[test]
    fn test_settings_error_from_json_error() {
        let err: SettingsError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_engine_error_wraps_sources() {
        let err: EngineError = SwapRejected::NonLinear.into();
        assert_eq!(err.to_string(), "cannot swap non-linear units");

        let err: EngineError = SettingsError::InvalidValue {
            field: "history_capacity",
            reason: "must be at least 1".to_string(),
        }
        .into();
        assert!(matches!(err, EngineError::Settings(SettingsError::InvalidValue { field: "history_capacity", .. })));

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Settings");
        assert_eq!(json["error"]["type"], "InvalidValue");
    }
}
