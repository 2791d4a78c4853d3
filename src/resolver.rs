//! Symptom selection -> medicine resolution by plurality vote

use crate::errors::{MedError, Result};
use crate::model::AssociationModel;
use log::debug;
use serde::Serialize;

/// A single symptom's prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub symptom: String,
    pub medicine: String,
}

/// Outcome of resolving a selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Winning medicine
    pub medicine: String,
    /// Per-symptom predictions in selection order
    pub votes: Vec<Vote>,
    /// Vote counts per medicine, in order of first appearance
    pub tally: Vec<(String, usize)>,
    /// Symptoms that produced no prediction
    pub skipped: Vec<String>,
}

/// Resolve a selection of symptoms to one medicine
///
/// Each symptom is looked up independently; symptoms without a prediction
/// are skipped. The medicine with the most votes wins, and ties go to the
/// medicine predicted first.
pub fn resolve<S: AsRef<str>>(selection: &[S], model: &AssociationModel) -> Result<Resolution> {
    if selection.is_empty() {
        return Err(MedError::EmptySelection);
    }

    let mut votes = Vec::new();
    let mut skipped = Vec::new();

    for symptom in selection {
        let symptom = symptom.as_ref();
        match model.predict(symptom) {
            Some(medicine) => votes.push(Vote {
                symptom: symptom.to_string(),
                medicine: medicine.to_string(),
            }),
            None => {
                debug!("No prediction for symptom '{}', skipping", symptom);
                skipped.push(symptom.to_string());
            }
        }
    }

    let tally = tally_votes(&votes);
    let medicine = plurality(&tally).ok_or_else(|| MedError::NoMatch {
        symptoms: selection.iter().map(|s| s.as_ref().to_string()).collect(),
    })?;

    Ok(Resolution {
        medicine: medicine.to_string(),
        votes,
        tally,
        skipped,
    })
}

/// Count votes per medicine, keeping first-appearance order
fn tally_votes(votes: &[Vote]) -> Vec<(String, usize)> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for vote in votes {
        match tally.iter_mut().find(|(m, _)| *m == vote.medicine) {
            Some((_, count)) => *count += 1,
            None => tally.push((vote.medicine.clone(), 1)),
        }
    }
    tally
}

fn plurality(tally: &[(String, usize)]) -> Option<&str> {
    let mut best: Option<&(String, usize)> = None;
    for entry in tally {
        if best.map_or(true, |(_, count)| entry.1 > *count) {
            best = Some(entry);
        }
    }
    best.map(|(medicine, _)| medicine.as_str())
}
