//! Application context shared by the CLI and REPL front ends
//!
//! Built once at startup from the configuration; read-only afterwards
//! apart from the history file it appends to.

use crate::catalog::{CatalogConflict, MedicineCatalog, MedicineInfo};
use crate::cli::Config;
use crate::dataset::{self, MedicalRecord};
use crate::errors::{MedError, Result};
use crate::history::HistoryLog;
use crate::model::AssociationModel;
use crate::resolver::{self, Resolution};
use log::{info, log, Level};
use serde::Serialize;

/// Result of a successful Submit
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub info: MedicineInfo,
    pub symptoms: Vec<String>,
    pub resolution: Resolution,
}

impl Recommendation {
    pub fn medicine(&self) -> &str {
        &self.info.medicine
    }
}

/// Everything a handler needs: dataset, vocabulary, model, catalog, history
pub struct AppContext {
    records: Vec<MedicalRecord>,
    vocabulary: Vec<String>,
    model: AssociationModel,
    catalog: MedicineCatalog,
    history: HistoryLog,
}

impl AppContext {
    /// Load the dataset named by the configuration and fit the model
    pub fn bootstrap(config: &Config) -> Result<Self> {
        let records = dataset::load_records(&config.dataset_path())?;
        Ok(Self::from_records(
            records,
            HistoryLog::new(config.history_path()),
        ))
    }

    /// Build a context from records already in memory
    pub fn from_records(records: Vec<MedicalRecord>, history: HistoryLog) -> Self {
        let rows = dataset::expand(&records);
        let model = AssociationModel::fit(&rows);
        let vocabulary = dataset::symptom_vocabulary(&records);
        let catalog = MedicineCatalog::from_records(&records);

        for conflict in catalog.conflicts() {
            log!(
                conflict_level(conflict),
                "Medicine '{}' appears for both '{}' and '{}'; using the '{}' entry",
                conflict.medicine,
                conflict.kept_disease,
                conflict.ignored_disease,
                conflict.kept_disease
            );
        }

        info!(
            "Context ready: {} records, {} symptoms, {} medicines",
            records.len(),
            vocabulary.len(),
            catalog.len()
        );

        Self {
            records,
            vocabulary,
            model,
            catalog,
            history,
        }
    }

    /// Resolve, join reference data and log to history
    ///
    /// Nothing is logged when resolution fails.
    pub fn recommend<S: AsRef<str>>(&self, selection: &[S]) -> Result<Recommendation> {
        let resolution = resolver::resolve(selection, &self.model)?;
        let info = self
            .catalog
            .lookup(&resolution.medicine)
            .cloned()
            .ok_or_else(|| MedError::UnknownMedicine(resolution.medicine.clone()))?;

        let symptoms: Vec<String> = selection.iter().map(|s| s.as_ref().to_string()).collect();
        self.history.append(&symptoms, &info.medicine)?;
        info!("Recommended {} for {}", info.medicine, symptoms.join(", "));

        Ok(Recommendation {
            info,
            symptoms,
            resolution,
        })
    }

    /// Map user input onto the vocabulary
    ///
    /// Input is trimmed and lower-cased before matching.
    pub fn normalize_symptom(&self, input: &str) -> Result<String> {
        let symptom = input.trim().to_lowercase();
        if self.is_known_symptom(&symptom) {
            Ok(symptom)
        } else {
            Err(MedError::UnknownSymptom(input.trim().to_string()))
        }
    }

    pub fn is_known_symptom(&self, symptom: &str) -> bool {
        self.vocabulary
            .binary_search_by(|s| s.as_str().cmp(symptom))
            .is_ok()
    }

    /// Sorted symptom vocabulary
    pub fn symptoms(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn records(&self) -> &[MedicalRecord] {
        &self.records
    }

    pub fn model(&self) -> &AssociationModel {
        &self.model
    }

    pub fn catalog(&self) -> &MedicineCatalog {
        &self.catalog
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}

/// A medicine shared by several diseases is normal; differing details are not
fn conflict_level(conflict: &CatalogConflict) -> Level {
    if conflict.disease_only {
        Level::Info
    } else {
        Level::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(disease: &str, symptoms: &[&str], medicine: &str) -> MedicalRecord {
        MedicalRecord {
            disease: disease.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            medicine: medicine.to_string(),
            uses: format!("{} relief", disease),
            dosage: "500mg".to_string(),
            side_effects: "nausea".to_string(),
        }
    }

    fn context(temp: &TempDir) -> AppContext {
        AppContext::from_records(
            vec![
                record("flu", &["fever", "cough"], "paracetamol"),
                record("cold", &["cough", "sneezing"], "antihistamine"),
            ],
            HistoryLog::new(temp.path().join("history.txt")),
        )
    }

    #[test]
    fn test_recommend_joins_catalog_and_logs() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        let rec = ctx.recommend(&["cough"]).unwrap();
        assert_eq!(rec.medicine(), "paracetamol");
        assert_eq!(rec.info.disease, "flu");
        assert_eq!(rec.info.uses, "flu relief");

        let entries = ctx.history().entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].symptoms, vec!["cough"]);
    }

    #[test]
    fn test_failed_recommend_does_not_log() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let empty: [&str; 0] = [];

        assert!(matches!(ctx.recommend(&empty), Err(MedError::EmptySelection)));
        assert!(matches!(
            ctx.recommend(&["rash"]),
            Err(MedError::NoMatch { .. })
        ));
        assert!(!ctx.history().exists());
    }

    #[test]
    fn test_normalize_symptom() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        assert_eq!(ctx.normalize_symptom("  Fever ").unwrap(), "fever");
        assert!(matches!(
            ctx.normalize_symptom("rash"),
            Err(MedError::UnknownSymptom(_))
        ));
        assert_eq!(ctx.symptoms(), &["cough", "fever", "sneezing"]);
    }

    #[test]
    fn test_shared_medicine_logs_below_warn() {
        let cold = record("cold", &["cough"], "cetirizine");
        let mut allergy = record("allergy", &["rash"], "cetirizine");
        allergy.uses = cold.uses.clone();
        let shared = MedicineCatalog::from_records(&[cold.clone(), allergy.clone()]);

        allergy.dosage = "20mg".to_string();
        let differing = MedicineCatalog::from_records(&[cold, allergy]);

        assert_eq!(conflict_level(&shared.conflicts()[0]), Level::Info);
        assert_eq!(conflict_level(&differing.conflicts()[0]), Level::Warn);
    }

    #[test]
    fn test_bootstrap_missing_dataset() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data.dataset_path = temp.path().join("missing.csv").to_string_lossy().to_string();

        assert!(matches!(
            AppContext::bootstrap(&config),
            Err(MedError::DataUnavailable { .. })
        ));
    }
}
