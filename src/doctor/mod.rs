//! Doctor command for system diagnostics
//!
//! Checks that the dataset loads cleanly and the history store is writable.

use crate::catalog::MedicineCatalog;
use crate::dataset::{self, MedicalRecord};
use crate::model::AssociationModel;
use colored::*;
use std::path::{Path, PathBuf};

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    dataset_path: PathBuf,
    history_path: PathBuf,
}

impl Doctor {
    pub fn new(dataset_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            history_path: history_path.into(),
        }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = vec![self.check_dataset_file()];

        match dataset::load_records(&self.dataset_path) {
            Ok(records) => {
                checks.push(HealthCheck::new(
                    "Dataset Records",
                    HealthStatus::Pass,
                ));
                checks.push(Self::check_vocabulary(&records));
                checks.push(Self::check_catalog(&records));
            }
            Err(e) => checks.push(HealthCheck::new(
                "Dataset Records",
                HealthStatus::Fail(e.to_string()),
            )),
        }

        checks.push(self.check_history_store());
        checks
    }

    /// Check 1: dataset file present
    fn check_dataset_file(&self) -> HealthCheck {
        let status = if self.dataset_path.is_file() {
            HealthStatus::Pass
        } else {
            HealthStatus::Fail(format!("{} not found", self.dataset_path.display()))
        };
        HealthCheck::new("Dataset File", status)
    }

    /// Check 2: every symptom comes from a record and yields a prediction
    fn check_vocabulary(records: &[MedicalRecord]) -> HealthCheck {
        let vocabulary = dataset::symptom_vocabulary(records);
        let rows = dataset::expand(records);

        if vocabulary.is_empty() {
            return HealthCheck::new(
                "Symptom Vocabulary",
                HealthStatus::Fail("No symptoms in dataset".to_string()),
            );
        }

        if let Some(row) = rows
            .iter()
            .find(|row| vocabulary.binary_search(&row.symptom).is_err())
        {
            return HealthCheck::new(
                "Symptom Vocabulary",
                HealthStatus::Fail(format!("'{}' is not in the vocabulary", row.symptom)),
            );
        }

        let model = AssociationModel::fit(&rows);
        let unresolved: Vec<&str> = vocabulary
            .iter()
            .filter(|s| model.predict(s).is_none())
            .map(String::as_str)
            .collect();

        let status = if unresolved.is_empty() {
            HealthStatus::Pass
        } else {
            HealthStatus::Warn(format!("No prediction for: {}", unresolved.join(", ")))
        };
        HealthCheck::new("Symptom Vocabulary", status)
    }

    /// Check 3: medicine names identify a single set of reference fields
    fn check_catalog(records: &[MedicalRecord]) -> HealthCheck {
        let catalog = MedicineCatalog::from_records(records);
        let conflicting: Vec<&str> = catalog
            .conflicts()
            .iter()
            .filter(|c| !c.disease_only)
            .map(|c| c.medicine.as_str())
            .collect();

        let status = if conflicting.is_empty() {
            HealthStatus::Pass
        } else {
            HealthStatus::Warn(format!(
                "Conflicting reference data for: {}",
                conflicting.join(", ")
            ))
        };
        HealthCheck::new("Medicine Catalog", status)
    }

    /// Check 4: history directory writable
    fn check_history_store(&self) -> HealthCheck {
        let dir = match self.history_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !dir.exists() {
            return HealthCheck::new(
                "History Store",
                HealthStatus::Warn(format!("{} will be created on first use", dir.display())),
            );
        }

        let probe = dir.join(".medbuddy_probe");
        match std::fs::write(&probe, "probe") {
            Ok(_) => {
                let _ = std::fs::remove_file(&probe);
                HealthCheck::new("History Store", HealthStatus::Pass)
            }
            Err(_) => HealthCheck::new(
                "History Store",
                HealthStatus::Fail(format!("No write permission in {}", dir.display())),
            ),
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "MedBuddy System Diagnostics".bold().cyan());
        println!("{:<20} {}", "Check", "Status");
        println!("{}", "=".repeat(50));

        for check in checks {
            let status = match &check.status {
                HealthStatus::Pass => "PASS".green(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red(),
            };
            println!("{:<20} {}", check.name, status);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
