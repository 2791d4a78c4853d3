//! REPL (Read-Eval-Print Loop) module for interactive symptom selection
//!
//! Replaces the checkbox window: symptoms are ticked by name, `/submit`
//! resolves the selection, `/reset` clears it and `/history` shows the log.

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

use anyhow::Result;
use log::warn;
use std::path::PathBuf;

use crate::app::AppContext;
use crate::cli::Config;
pub use crate::repl::commands::{Command, CommandHandler};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::{Input, InputHandler};
pub use crate::repl::session::Session;

/// REPL session coordinator
///
/// Owns input handling, command dispatch, selection state and display.
/// The application context is borrowed for the lifetime of the loop.
pub struct ReplSession<'a> {
    ctx: &'a AppContext,
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session: Session,
    display_manager: DisplayManager,
}

impl<'a> ReplSession<'a> {
    pub fn new(ctx: &'a AppContext, config: ReplConfig) -> Result<Self> {
        let input_handler = match config.history_file {
            Some(path) => InputHandler::with_history(path)?,
            None => InputHandler::new()?,
        };
        let mut command_handler = CommandHandler::new();
        command_handler.set_verbose(config.verbose);

        let mut display_manager = DisplayManager::new().with_columns(config.symptom_columns);
        display_manager.set_show_votes(config.verbose);

        Ok(ReplSession {
            ctx,
            input_handler,
            command_handler,
            session: Session::new(),
            display_manager,
        })
    }

    /// Show welcome banner
    pub fn show_welcome(&self, version: &str) {
        self.display_manager.show_banner(
            version,
            self.ctx.symptoms().len(),
            self.ctx.records().len(),
        );
    }

    /// Run until `/exit` or Ctrl-D
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.input_handler.read_line()? {
                Input::Line(line) => {
                    if !self.handle_input(&line)? {
                        break;
                    }
                }
                Input::Interrupted => {
                    self.display_manager
                        .show_info("Press Ctrl-D or type /exit to quit");
                }
                Input::Eof => break,
            }
        }

        if let Err(e) = self.save() {
            warn!("Failed to save command history: {}", e);
        }
        Ok(())
    }

    /// Handle one line of user input
    ///
    /// Returns true if session should continue, false to exit
    pub fn handle_input(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(true);
        }

        let command = self.command_handler.parse(input);
        let keep_going = self.command_handler.execute(
            command,
            self.ctx,
            &mut self.session,
            &self.display_manager,
        )?;
        self.display_manager
            .set_show_votes(self.command_handler.is_verbose());
        Ok(keep_going)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_verbose(&self) -> bool {
        self.command_handler.is_verbose()
    }

    pub fn set_verbose(&mut self, enable: bool) {
        self.command_handler.set_verbose(enable);
        self.display_manager.set_show_votes(enable);
    }

    /// Persist command-line history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()
    }
}

/// Configuration for REPL mode
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Readline history (not the recommendation log)
    pub history_file: Option<PathBuf>,
    pub symptom_columns: usize,
    pub verbose: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            history_file: None,
            symptom_columns: 3,
            verbose: false,
        }
    }
}

impl ReplConfig {
    /// Derive REPL settings from the application configuration
    pub fn from_config(config: &Config, verbose: bool) -> Self {
        ReplConfig {
            history_file: dirs::home_dir().map(|home| home.join(".medbuddy_history")),
            symptom_columns: config.display.symptom_columns,
            verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MedicalRecord;
    use crate::history::HistoryLog;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> AppContext {
        AppContext::from_records(
            vec![MedicalRecord {
                disease: "flu".to_string(),
                symptoms: vec!["fever".to_string(), "cough".to_string()],
                medicine: "paracetamol".to_string(),
                uses: "fever relief".to_string(),
                dosage: "500mg".to_string(),
                side_effects: "nausea".to_string(),
            }],
            HistoryLog::new(temp.path().join("history.txt")),
        )
    }

    #[test]
    fn test_handle_empty_input() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

        assert!(repl.handle_input("").unwrap());
        assert!(repl.handle_input("   ").unwrap());
    }

    #[test]
    fn test_handle_exit_command() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

        assert!(!repl.handle_input("/exit").unwrap());
    }

    #[test]
    fn test_select_submit_reset_cycle() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

        repl.handle_input("Fever, cough").unwrap();
        assert_eq!(repl.session().selection_len(), 2);

        repl.handle_input("/submit").unwrap();
        assert_eq!(
            repl.session().last_recommendation().map(|r| r.medicine()),
            Some("paracetamol")
        );

        repl.handle_input("/reset").unwrap();
        assert_eq!(repl.session().selection_len(), 0);
        assert!(repl.session().last_recommendation().is_none());
        assert_eq!(ctx.history().entries().unwrap().len(), 1);
    }

    #[test]
    fn test_verbose_mode() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

        assert!(!repl.is_verbose());
        repl.handle_input("/verbose on").unwrap();
        assert!(repl.is_verbose());
        repl.set_verbose(false);
        assert!(!repl.is_verbose());
    }

    #[test]
    fn test_repl_config_from_config() {
        let mut config = Config::default();
        config.display.symptom_columns = 4;
        let repl_config = ReplConfig::from_config(&config, true);

        assert_eq!(repl_config.symptom_columns, 4);
        assert!(repl_config.verbose);
    }
}
