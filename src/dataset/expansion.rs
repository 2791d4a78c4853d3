//! Flattening of multi-symptom records into training rows

use super::MedicalRecord;
use serde::{Deserialize, Serialize};

/// One (symptom, disease, medicine) observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomAssociation {
    pub symptom: String,
    pub disease: String,
    pub medicine: String,
}

/// One row per (record, symptom), in record order then symptom order
pub fn expand(records: &[MedicalRecord]) -> Vec<SymptomAssociation> {
    records
        .iter()
        .flat_map(|record| {
            record.symptoms.iter().map(move |symptom| SymptomAssociation {
                symptom: symptom.clone(),
                disease: record.disease.clone(),
                medicine: record.medicine.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(disease: &str, symptoms: &[&str], medicine: &str) -> MedicalRecord {
        MedicalRecord {
            disease: disease.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            medicine: medicine.to_string(),
            uses: String::new(),
            dosage: String::new(),
            side_effects: String::new(),
        }
    }

    #[test]
    fn test_expand_preserves_order() {
        let records = vec![
            record("flu", &["fever", "cough"], "paracetamol"),
            record("cold", &["cough", "sneezing"], "antihistamine"),
        ];

        let rows = expand(&records);
        let symptoms: Vec<&str> = rows.iter().map(|r| r.symptom.as_str()).collect();
        assert_eq!(symptoms, vec!["fever", "cough", "cough", "sneezing"]);
        assert_eq!(rows[2].disease, "cold");
        assert_eq!(rows[2].medicine, "antihistamine");
    }

    #[test]
    fn test_expand_skips_records_without_symptoms() {
        let records = vec![record("unknown", &[], "placebo")];
        assert!(expand(&records).is_empty());
    }
}
