//! Association model: symptom -> disease -> medicine
//!
//! Two maximum-likelihood lookup tables fitted once from the expanded
//! dataset. A prediction chains the most frequent disease for a symptom
//! into the most frequent medicine for that disease. Ties are broken by
//! first-encountered order in the training rows.

pub mod frequency;

pub use frequency::FrequencyTable;

use crate::dataset::SymptomAssociation;
use log::{debug, trace};

/// Immutable symptom/disease/medicine association tables
#[derive(Debug, Clone, Default)]
pub struct AssociationModel {
    symptom_disease: FrequencyTable,
    disease_medicine: FrequencyTable,
}

impl AssociationModel {
    /// Fit both tables from training rows
    pub fn fit(rows: &[SymptomAssociation]) -> Self {
        let mut symptom_disease = FrequencyTable::new();
        let mut disease_medicine = FrequencyTable::new();

        for row in rows {
            symptom_disease.observe(&row.symptom, &row.disease);
            disease_medicine.observe(&row.disease, &row.medicine);
        }

        debug!(
            "Fitted association model: {} symptoms, {} diseases from {} rows",
            symptom_disease.len(),
            disease_medicine.len(),
            rows.len()
        );

        Self {
            symptom_disease,
            disease_medicine,
        }
    }

    /// Most likely disease for a symptom
    pub fn disease_for(&self, symptom: &str) -> Option<&str> {
        self.symptom_disease.most_frequent(symptom)
    }

    /// Most likely medicine for a disease
    pub fn medicine_for(&self, disease: &str) -> Option<&str> {
        self.disease_medicine.most_frequent(disease)
    }

    /// Most likely medicine for a symptom, or `None` if the symptom was never seen
    pub fn predict(&self, symptom: &str) -> Option<&str> {
        let disease = self.disease_for(symptom)?;
        let medicine = self.medicine_for(disease)?;
        trace!("{} -> {} -> {}", symptom, disease, medicine);
        Some(medicine)
    }

    /// P(disease | symptom) for every disease seen with the symptom
    pub fn disease_distribution(&self, symptom: &str) -> Vec<(String, f64)> {
        self.symptom_disease.distribution(symptom)
    }

    pub fn knows_symptom(&self, symptom: &str) -> bool {
        self.symptom_disease.contains(symptom)
    }

    pub fn symptom_count(&self) -> usize {
        self.symptom_disease.len()
    }

    pub fn disease_count(&self) -> usize {
        self.disease_medicine.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symptom: &str, disease: &str, medicine: &str) -> SymptomAssociation {
        SymptomAssociation {
            symptom: symptom.to_string(),
            disease: disease.to_string(),
            medicine: medicine.to_string(),
        }
    }

    fn flu_and_cold() -> AssociationModel {
        AssociationModel::fit(&[
            row("fever", "flu", "paracetamol"),
            row("cough", "flu", "paracetamol"),
            row("cough", "cold", "antihistamine"),
            row("sneezing", "cold", "antihistamine"),
        ])
    }

    #[test]
    fn test_single_association_is_deterministic() {
        let model = flu_and_cold();
        assert_eq!(model.disease_for("fever"), Some("flu"));
        assert_eq!(model.predict("sneezing"), Some("antihistamine"));
    }

    #[test]
    fn test_tied_symptom_uses_training_order() {
        let model = flu_and_cold();
        assert_eq!(model.disease_for("cough"), Some("flu"));
        assert_eq!(model.predict("cough"), Some("paracetamol"));
    }

    #[test]
    fn test_majority_disease_wins() {
        let model = AssociationModel::fit(&[
            row("cough", "cold", "antihistamine"),
            row("cough", "bronchitis", "amoxicillin"),
            row("cough", "bronchitis", "amoxicillin"),
        ]);
        assert_eq!(model.predict("cough"), Some("amoxicillin"));
    }

    #[test]
    fn test_disease_with_several_medicines() {
        let model = AssociationModel::fit(&[
            row("headache", "migraine", "sumatriptan"),
            row("nausea", "migraine", "ibuprofen"),
            row("aura", "migraine", "ibuprofen"),
        ]);
        assert_eq!(model.medicine_for("migraine"), Some("ibuprofen"));
        assert_eq!(model.predict("headache"), Some("ibuprofen"));
    }

    #[test]
    fn test_unknown_symptom() {
        let model = flu_and_cold();
        assert_eq!(model.predict("rash"), None);
        assert!(!model.knows_symptom("rash"));
    }

    #[test]
    fn test_counts() {
        let model = flu_and_cold();
        assert_eq!(model.symptom_count(), 3);
        assert_eq!(model.disease_count(), 2);
        assert_eq!(model.disease_distribution("cough").len(), 2);
    }
}
