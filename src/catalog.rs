//! Medicine reference data keyed by medicine name

use crate::dataset::MedicalRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Reference fields shown alongside a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicineInfo {
    pub medicine: String,
    pub disease: String,
    pub uses: String,
    pub dosage: String,
    pub side_effects: String,
}

impl From<&MedicalRecord> for MedicineInfo {
    fn from(record: &MedicalRecord) -> Self {
        MedicineInfo {
            medicine: record.medicine.clone(),
            disease: record.disease.clone(),
            uses: record.uses.clone(),
            dosage: record.dosage.clone(),
            side_effects: record.side_effects.clone(),
        }
    }
}

/// A later record that names an already-catalogued medicine with different text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConflict {
    pub medicine: String,
    pub kept_disease: String,
    pub ignored_disease: String,
    /// Only the disease differs; uses/dosage/side effects match
    pub disease_only: bool,
}

/// Lookup from medicine name to the first record naming it
#[derive(Debug, Clone, Default)]
pub struct MedicineCatalog {
    entries: HashMap<String, MedicineInfo>,
    conflicts: Vec<CatalogConflict>,
}

impl MedicineCatalog {
    pub fn from_records(records: &[MedicalRecord]) -> Self {
        let mut entries: HashMap<String, MedicineInfo> = HashMap::new();
        let mut conflicts = Vec::new();

        for record in records {
            let info = MedicineInfo::from(record);
            match entries.get(&record.medicine) {
                Some(kept) if *kept != info => {
                    let same_text = kept.uses == info.uses
                        && kept.dosage == info.dosage
                        && kept.side_effects == info.side_effects;
                    conflicts.push(CatalogConflict {
                        medicine: record.medicine.clone(),
                        kept_disease: kept.disease.clone(),
                        ignored_disease: info.disease,
                        disease_only: same_text,
                    });
                }
                Some(_) => {}
                None => {
                    entries.insert(record.medicine.clone(), info);
                }
            }
        }

        Self { entries, conflicts }
    }

    pub fn lookup(&self, medicine: &str) -> Option<&MedicineInfo> {
        self.entries.get(medicine)
    }

    /// Records shadowed by an earlier record with the same medicine name
    pub fn conflicts(&self) -> &[CatalogConflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(disease: &str, medicine: &str, dosage: &str) -> MedicalRecord {
        MedicalRecord {
            disease: disease.to_string(),
            symptoms: vec!["cough".to_string()],
            medicine: medicine.to_string(),
            uses: "relief".to_string(),
            dosage: dosage.to_string(),
            side_effects: "none".to_string(),
        }
    }

    #[test]
    fn test_first_record_wins() {
        let catalog = MedicineCatalog::from_records(&[
            record("cold", "cetirizine", "10mg"),
            record("allergy", "cetirizine", "10mg"),
        ]);

        let info = catalog.lookup("cetirizine").unwrap();
        assert_eq!(info.disease, "cold");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.conflicts().len(), 1);
        assert!(catalog.conflicts()[0].disease_only);
    }

    #[test]
    fn test_conflicting_dosage_flagged() {
        let catalog = MedicineCatalog::from_records(&[
            record("flu", "paracetamol", "500mg"),
            record("fever", "paracetamol", "1g"),
        ]);
        assert!(!catalog.conflicts()[0].disease_only);
    }

    #[test]
    fn test_identical_duplicates_are_not_conflicts() {
        let catalog = MedicineCatalog::from_records(&[
            record("flu", "paracetamol", "500mg"),
            record("flu", "paracetamol", "500mg"),
        ]);
        assert!(catalog.conflicts().is_empty());
    }

    #[test]
    fn test_missing_medicine() {
        let catalog = MedicineCatalog::from_records(&[]);
        assert!(catalog.lookup("aspirin").is_none());
        assert!(catalog.is_empty());
    }
}
