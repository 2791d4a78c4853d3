//! MedBuddy - symptom-driven medicine lookup
//!
//! Loads a table of diseases, symptoms and medicines, fits a two-step
//! association model (symptom -> disease -> medicine) and resolves a
//! selection of symptoms to one medicine by plurality vote.
//!
//! # Architecture
//!
//! - **Data**: `dataset` loading and expansion, `catalog` reference lookup
//! - **Decision**: `model` frequency tables, `resolver` voting
//! - **Persistence**: `history` append-only log
//! - **Interface**: `app` context, `cli`, `repl`, `doctor`

pub mod errors;

// Re-export commonly used types
pub use errors::{MedError, Result};

pub mod catalog;
pub mod dataset;
pub mod history;
pub mod model;
pub mod resolver;

pub mod app;
pub use app::{AppContext, Recommendation};

pub mod cli;
pub mod doctor;
pub mod repl;
