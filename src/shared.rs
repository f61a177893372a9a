pub mod types;
pub mod settings;
pub mod errors;

#[cfg(test)]
mod types_test;

// Re-export error types for convenience
pub use errors::{ConversionError, EngineError, EngineResult, SettingsError, SwapRejected};
