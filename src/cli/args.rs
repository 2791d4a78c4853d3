//! Command-line argument parsing for MedBuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::cli::Config;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// MedBuddy - symptom-driven medicine lookup
#[derive(Parser, Debug)]
#[command(name = "medbuddy")]
#[command(version)]
#[command(about = "Pick symptoms, get a medicine suggestion and its reference sheet", long_about = None)]
pub struct Args {
    /// Dataset CSV (disease, symptoms, medicine, uses, dosage, side_effects)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// History file
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start interactive REPL mode (default)
    Start,

    /// Recommend a medicine for the given symptoms
    Recommend {
        /// Symptoms, e.g. fever "runny nose"
        #[arg(required = true, value_name = "SYMPTOM")]
        symptoms: Vec<String>,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every known symptom
    Symptoms,

    /// Show recommendation history
    History {
        /// Show only the last N entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check dataset and history store
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Apply command-line overrides on top of file configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data.dataset_path = data.to_string_lossy().to_string();
        }
        if let Some(history) = &self.history {
            config.history.path = history.to_string_lossy().to_string();
        }
        if self.quiet || self.verbose > 0 {
            config.display.default_verbosity = self.verbosity().as_str().to_string();
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse the configuration file spelling
    pub fn from_config(value: &str) -> Self {
        match value {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "very_verbose" => Verbosity::VeryVerbose,
            _ => Verbosity::Normal,
        }
    }

    /// Default log filter when RUST_LOG is unset
    pub fn log_level(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Normal => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Debug,
            Verbosity::VeryVerbose => LevelFilter::Trace,
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show per-symptom votes
    pub fn show_votes(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}
