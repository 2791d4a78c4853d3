//! Append-only plain-text history of past recommendations
//!
//! One line per query: `YYYY-MM-DD HH:MM:SS | sym1, sym2 -> medicine`.
//! The file is opened, appended and closed within a single call.

use crate::errors::{MedError, Result};
use chrono::Local;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Returned by `read_all` when nothing has been recorded yet
pub const NO_HISTORY: &str = "No history available.";

/// Timestamp layout used in history lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single logged query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub symptoms: Vec<String>,
    pub medicine: String,
}

impl HistoryEntry {
    /// Entry stamped with the current local time
    pub fn now(symptoms: &[String], medicine: &str) -> Self {
        HistoryEntry {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            symptoms: symptoms.to_vec(),
            medicine: medicine.to_string(),
        }
    }

    /// Parse one history line back into an entry
    pub fn parse(line: &str) -> Option<Self> {
        let (timestamp, rest) = line.trim_end().split_once(" | ")?;
        let (symptoms, medicine) = rest.rsplit_once(" -> ")?;

        chrono::NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;

        Some(HistoryEntry {
            timestamp: timestamp.to_string(),
            symptoms: symptoms
                .split(", ")
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            medicine: medicine.to_string(),
        })
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} -> {}",
            self.timestamp,
            self.symptoms.join(", "),
            self.medicine
        )
    }
}

/// History store backed by a text file
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Record a query stamped with the current time
    pub fn append(&self, symptoms: &[String], medicine: &str) -> Result<HistoryEntry> {
        let entry = HistoryEntry::now(symptoms, medicine);
        self.append_entry(&entry)?;
        Ok(entry)
    }

    /// Append a prepared entry, creating the file if absent
    pub fn append_entry(&self, entry: &HistoryEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    MedError::HistoryError(format!("Failed to create history directory: {}", e))
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| MedError::HistoryError(format!("Failed to open history file: {}", e)))?;

        writeln!(file, "{}", entry)?;
        debug!("Appended history entry to {}", self.path.display());
        Ok(())
    }

    /// Full stored text, or `NO_HISTORY` when the file does not exist
    pub fn read_all(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(NO_HISTORY.to_string());
        }
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Every parsable entry, oldest first
    pub fn entries(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(text.lines().filter_map(HistoryEntry::parse).collect())
    }

    /// The last `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let entries = self.entries()?;
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.into_iter().skip(skip).collect())
    }

    /// Lines to show: the whole log when `limit` is `None`, else the last `limit` entries
    pub fn view(&self, limit: Option<usize>) -> Result<Vec<String>> {
        match limit {
            None => Ok(self.read_all()?.lines().map(str::to_string).collect()),
            Some(limit) => Ok(self
                .recent(limit)?
                .iter()
                .map(ToString::to_string)
                .collect()),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
