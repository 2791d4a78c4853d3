//! Error types for MedBuddy
//!
//! Library code returns `MedError`; the binary wraps it in `anyhow` at the edges.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dataset loading, resolution and history handling
#[derive(Error, Debug)]
pub enum MedError {
    /// Dataset missing, unreadable, malformed or empty
    #[error("Dataset unavailable at {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// Submit without any symptom selected
    #[error("Please select at least one symptom.")]
    EmptySelection,

    /// None of the selected symptoms produced a prediction
    #[error("No matching medicine found for: {}", .symptoms.join(", "))]
    NoMatch { symptoms: Vec<String> },

    /// Symptom outside the dataset vocabulary
    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    /// Resolved medicine has no catalog entry
    #[error("No reference data for medicine: {0}")]
    UnknownMedicine(String),

    /// History store errors
    #[error("History error: {0}")]
    HistoryError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

}

/// Result type alias for MedBuddy operations
pub type Result<T> = std::result::Result<T, MedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_display() {
        let err = MedError::DataUnavailable {
            path: PathBuf::from("data2.csv"),
            reason: "file not found".to_string(),
        };
        assert!(err.to_string().contains("data2.csv"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_no_match_lists_symptoms() {
        let err = MedError::NoMatch {
            symptoms: vec!["fever".to_string(), "cough".to_string()],
        };
        assert!(err.to_string().contains("fever, cough"));
    }

    #[test]
    fn test_empty_selection_message() {
        assert_eq!(
            MedError::EmptySelection.to_string(),
            "Please select at least one symptom."
        );
    }
}
