//! Dataset loading for MedBuddy
//!
//! Reads medical records from a CSV file with the columns
//! `disease, symptoms, medicine, uses, dosage, side_effects`, where
//! `symptoms` is a single comma-separated cell.

pub mod expansion;

pub use expansion::{expand, SymptomAssociation};

use crate::errors::{MedError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of the dataset after symptom normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub disease: String,
    pub symptoms: Vec<String>,
    pub medicine: String,
    pub uses: String,
    pub dosage: String,
    pub side_effects: String,
}

/// Row as it appears on disk
#[derive(Debug, Deserialize)]
struct RawRecord {
    disease: String,
    symptoms: String,
    medicine: String,
    uses: String,
    dosage: String,
    side_effects: String,
}

impl From<RawRecord> for MedicalRecord {
    fn from(raw: RawRecord) -> Self {
        MedicalRecord {
            disease: raw.disease,
            symptoms: parse_symptoms(&raw.symptoms),
            medicine: raw.medicine,
            uses: raw.uses,
            dosage: raw.dosage,
            side_effects: raw.side_effects,
        }
    }
}

/// Split a symptom cell into trimmed, lower-cased entries
///
/// Empty fragments (doubled or trailing commas) are dropped.
pub fn parse_symptoms(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse records from any CSV source
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<MedicalRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRecord>() {
        records.push(MedicalRecord::from(row?));
    }

    Ok(records)
}

/// Load the dataset from disk
///
/// Any failure (missing file, malformed row, header-only file) is reported
/// as `DataUnavailable`; callers abort startup on it.
pub fn load_records(path: &Path) -> Result<Vec<MedicalRecord>> {
    let unavailable = |reason: String| MedError::DataUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
    let records = parse_records(file).map_err(|e| unavailable(e.to_string()))?;

    if records.is_empty() {
        return Err(unavailable("dataset contains no records".to_string()));
    }

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// All distinct symptoms across the dataset, sorted
pub fn symptom_vocabulary(records: &[MedicalRecord]) -> Vec<String> {
    let vocabulary: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.symptoms.iter().map(String::as_str))
        .collect();

    debug!("Symptom vocabulary has {} entries", vocabulary.len());
    vocabulary.into_iter().map(str::to_string).collect()
}
