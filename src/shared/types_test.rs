//! Test to trigger ts-rs bindings export
//! Run with: cargo test export_bindings

#[cfg(test)]
mod tests {
    use crate::shared::settings::EngineSettings;
    use crate::shared::types::*;
    use ts_rs::TS;

    #[test]
    fn export_bindings() {
        // Bindings are written to bindings/bindings.ts for the screen frontend
        DisplayModel::export().expect("Failed to export DisplayModel");
        ResultDisplay::export().expect("Failed to export ResultDisplay");
        ConversionHistoryEntry::export().expect("Failed to export ConversionHistoryEntry");
        CategoryDTO::export().expect("Failed to export CategoryDTO");
        RuleDTO::export().expect("Failed to export RuleDTO");
        DetectedQuantity::export().expect("Failed to export DetectedQuantity");
        EngineSettings::export().expect("Failed to export EngineSettings");
    }

    #[test]
    fn result_display_serializes_tagged() {
        let json = serde_json::to_value(ResultDisplay::Value("3,280.84".to_string())).unwrap();
        assert_eq!(json["state"], "Value");
        assert_eq!(json["text"], "3,280.84");

        let blank = serde_json::to_value(ResultDisplay::Blank).unwrap();
        assert_eq!(blank["state"], "Blank");
    }

    #[test]
    fn result_display_text() {
        assert_eq!(ResultDisplay::Blank.text(), "");
        assert_eq!(ResultDisplay::Error("Error".to_string()).text(), "Error");
        assert!(ResultDisplay::Value("1".to_string()).is_value());
    }
}
