//! Display manager for REPL terminal UI
//!
//! Symptom checklist, recommendation sheet and history rendering.

use crate::app::Recommendation;
use crate::history::HistoryEntry;
use crate::model::AssociationModel;
use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

/// Display manager for REPL UI
pub struct DisplayManager {
    columns: usize,
    show_votes: bool,
    update_interval: Duration,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            columns: 3,
            show_votes: false,
            update_interval: Duration::from_millis(100),
        }
    }

    /// Set the number of columns for the symptom checklist
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    pub fn set_show_votes(&mut self, show: bool) {
        self.show_votes = show;
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, symptom_count: usize, record_count: usize) {
        let width = 64;
        let title = format!("  MedBuddy {} - Medicine Recommendation", version);
        let info = format!(
            "  Records: {} | Symptoms: {} | Mode: REPL",
            record_count, symptom_count
        );

        println!("\n{}", "=".repeat(width).cyan());
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", "=".repeat(width).cyan());
        println!(
            "Type symptoms separated by commas to tick them, {} to see the list, {} to get a suggestion\n",
            "/symptoms".green(),
            "/submit".green()
        );
    }

    /// Spinner shown while the dataset loads and the model is fitted
    pub fn start_loading(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.update_interval);
        pb
    }

    /// Print the symptom checklist
    pub fn show_symptoms(&self, symptoms: &[String], selected: &BTreeSet<String>) {
        if symptoms.is_empty() {
            println!("{}", "No symptoms match.".yellow());
            return;
        }

        self.show_section(&format!("Symptoms ({})", symptoms.len()));
        for line in format_symptom_grid(symptoms, selected, self.columns) {
            println!("  {}", line);
        }
        println!();
    }

    /// Print the current selection
    pub fn show_selection(&self, selected: &[String]) {
        if selected.is_empty() {
            println!("{}", "No symptoms selected.".yellow());
        } else {
            println!("{} {}", "Selected:".cyan(), selected.join(", "));
        }
    }

    /// Print a recommendation sheet
    pub fn show_recommendation(&self, recommendation: &Recommendation) {
        println!();
        for line in format_recommendation(recommendation) {
            println!("{}", line);
        }

        if self.show_votes {
            println!("\n{}", "Votes:".dimmed());
            for vote in &recommendation.resolution.votes {
                println!("  {} {} -> {}", "•".cyan(), vote.symptom, vote.medicine);
            }
            for symptom in &recommendation.resolution.skipped {
                println!("  {} {} (no prediction)", "•".dimmed(), symptom.dimmed());
            }
        }
        println!();
    }

    /// Print the symptom -> disease -> medicine chain for each symptom
    pub fn show_explanation(&self, model: &AssociationModel, selected: &[String]) {
        self.show_section("Explanation");
        for symptom in selected {
            let chain = match (model.disease_for(symptom), model.predict(symptom)) {
                (Some(disease), Some(medicine)) => format!("{} -> {}", disease, medicine),
                _ => "no prediction".to_string(),
            };
            println!("  {} {}", capitalize(symptom).bold(), chain.green());

            for (disease, p) in model.disease_distribution(symptom) {
                println!("      P({} | {}) = {:.2}", disease, symptom, p);
            }
        }
        println!();
    }

    /// Print history lines, highlighting the ones in the log format
    pub fn show_history(&self, lines: &[String]) {
        if lines.is_empty() {
            println!("{}", crate::history::NO_HISTORY.yellow());
            return;
        }

        for line in lines {
            match HistoryEntry::parse(line) {
                Some(entry) => println!(
                    "{} | {} -> {}",
                    entry.timestamp.dimmed(),
                    entry.symptoms.join(", "),
                    entry.medicine.green()
                ),
                None => println!("{}", line),
            }
        }
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Upper-case the first letter
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Checklist rows, `columns` symptoms per row, ticked when selected
pub fn format_symptom_grid(
    symptoms: &[String],
    selected: &BTreeSet<String>,
    columns: usize,
) -> Vec<String> {
    let cells: Vec<String> = symptoms
        .iter()
        .map(|s| {
            let mark = if selected.contains(s) { "x" } else { " " };
            format!("[{}] {}", mark, capitalize(s))
        })
        .collect();
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0) + 2;

    cells
        .chunks(columns.max(1))
        .map(|row| {
            row.iter()
                .map(|cell| format!("{:<width$}", cell, width = width))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Recommendation sheet lines
pub fn format_recommendation(recommendation: &Recommendation) -> Vec<String> {
    let info = &recommendation.info;
    vec![
        format!("Recommended Medicine: {}", info.medicine),
        String::new(),
        format!("Disease: {}", info.disease),
        format!("Uses: {}", info.uses),
        format!("Dosage: {}", info.dosage),
        format!("Side Effects: {}", info.side_effects),
    ]
}
