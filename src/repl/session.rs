//! Per-session REPL state: the current symptom selection and last output

use crate::app::Recommendation;
use std::collections::BTreeSet;

/// Mutable state between REPL commands
///
/// The selection is kept sorted, which matches vocabulary order.
#[derive(Debug, Default)]
pub struct Session {
    selection: BTreeSet<String>,
    last_recommendation: Option<Recommendation>,
    submissions: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom; returns false if it was already selected
    pub fn select(&mut self, symptom: String) -> bool {
        self.selection.insert(symptom)
    }

    /// Remove a symptom; returns false if it was not selected
    pub fn deselect(&mut self, symptom: &str) -> bool {
        self.selection.remove(symptom)
    }

    /// Flip a symptom's checkbox; returns the new state
    pub fn toggle(&mut self, symptom: String) -> bool {
        if self.selection.remove(&symptom) {
            false
        } else {
            self.selection.insert(symptom);
            true
        }
    }

    pub fn is_selected(&self, symptom: &str) -> bool {
        self.selection.contains(symptom)
    }

    /// Selected symptoms in vocabulary order
    pub fn selected(&self) -> Vec<String> {
        self.selection.iter().cloned().collect()
    }

    pub fn selection_set(&self) -> &BTreeSet<String> {
        &self.selection
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn record(&mut self, recommendation: Recommendation) {
        self.last_recommendation = Some(recommendation);
        self.submissions += 1;
    }

    pub fn last_recommendation(&self) -> Option<&Recommendation> {
        self.last_recommendation.as_ref()
    }

    /// Successful submissions this session
    pub fn submissions(&self) -> usize {
        self.submissions
    }

    /// Clear selection and output
    pub fn reset(&mut self) {
        self.selection.clear();
        self.last_recommendation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_sorted() {
        let mut session = Session::new();
        session.select("sneezing".to_string());
        session.select("cough".to_string());
        session.select("fever".to_string());

        assert_eq!(session.selected(), vec!["cough", "fever", "sneezing"]);
    }

    #[test]
    fn test_select_twice() {
        let mut session = Session::new();
        assert!(session.select("fever".to_string()));
        assert!(!session.select("fever".to_string()));
        assert_eq!(session.selection_len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut session = Session::new();
        assert!(session.toggle("fever".to_string()));
        assert!(session.is_selected("fever"));
        assert!(!session.toggle("fever".to_string()));
        assert!(!session.is_selected("fever"));
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut session = Session::new();
        session.select("fever".to_string());
        session.reset();

        assert_eq!(session.selection_len(), 0);
        assert!(session.last_recommendation().is_none());
        assert!(!session.deselect("fever"));
    }
}
