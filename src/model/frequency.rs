//! Conditional frequency table with first-seen tie breaking

use std::collections::HashMap;

/// Co-occurrence counts of `value` given `key`
///
/// Values are kept in the order they were first observed for each key, so
/// `most_frequent` resolves ties towards the earliest observation.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, Vec<(String, usize)>>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `value` alongside `key`
    pub fn observe(&mut self, key: &str, value: &str) {
        let values = self.counts.entry(key.to_string()).or_default();
        match values.iter_mut().find(|(v, _)| v == value) {
            Some((_, count)) => *count += 1,
            None => values.push((value.to_string(), 1)),
        }
    }

    /// Maximum-count value for `key`
    pub fn most_frequent(&self, key: &str) -> Option<&str> {
        let values = self.counts.get(key)?;
        let mut best: Option<&(String, usize)> = None;
        for entry in values {
            if best.map_or(true, |(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.map(|(value, _)| value.as_str())
    }

    /// Observed count of `value` given `key`
    pub fn count(&self, key: &str, value: &str) -> usize {
        self.counts
            .get(key)
            .and_then(|values| values.iter().find(|(v, _)| v == value))
            .map_or(0, |(_, count)| *count)
    }

    /// Maximum-likelihood P(value | key) for every observed value
    pub fn distribution(&self, key: &str) -> Vec<(String, f64)> {
        let Some(values) = self.counts.get(key) else {
            return Vec::new();
        };
        let total: usize = values.iter().map(|(_, count)| count).sum();
        values
            .iter()
            .map(|(value, count)| (value.clone(), *count as f64 / total as f64))
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_frequent_by_count() {
        let mut table = FrequencyTable::new();
        table.observe("cough", "cold");
        table.observe("cough", "flu");
        table.observe("cough", "flu");

        assert_eq!(table.most_frequent("cough"), Some("flu"));
        assert_eq!(table.count("cough", "flu"), 2);
        assert_eq!(table.count("cough", "measles"), 0);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let mut table = FrequencyTable::new();
        table.observe("cough", "flu");
        table.observe("cough", "cold");

        assert_eq!(table.most_frequent("cough"), Some("flu"));
    }

    #[test]
    fn test_unknown_key() {
        let table = FrequencyTable::new();
        assert_eq!(table.most_frequent("fever"), None);
        assert!(table.distribution("fever").is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let mut table = FrequencyTable::new();
        table.observe("headache", "migraine");
        table.observe("headache", "flu");
        table.observe("headache", "flu");
        table.observe("headache", "sinusitis");

        let dist = table.distribution("headache");
        assert_eq!(dist[0].0, "migraine");
        assert!((dist[1].1 - 0.5).abs() < 1e-9);
        let total: f64 = dist.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
