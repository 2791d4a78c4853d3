//! Command handler for REPL built-in commands
//!
//! Slash commands drive the session; any other input is a comma-separated
//! list of symptoms whose checkboxes are flipped.

use crate::app::AppContext;
use crate::errors::MedError;
use crate::repl::display::DisplayManager;
use crate::repl::session::Session;
use anyhow::Result;
use colored::*;
use log::debug;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Symptoms { filter: Option<String> },
    Select { symptoms: Vec<String> },
    Deselect { symptoms: Vec<String> },
    Toggle { symptoms: Vec<String> },
    Selection,
    Submit,
    Explain,
    Reset,
    History { limit: Option<usize> },
    Verbose { enable: bool },
    Clear,
    Exit,
    Unknown { input: String },
}

/// Command handler for parsing and executing REPL commands
pub struct CommandHandler {
    verbose: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler { verbose: false }
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        if !is_command(trimmed) {
            return Command::Toggle {
                symptoms: split_symptoms(trimmed),
            };
        }

        let body = &trimmed[1..];
        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };

        match name.to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "symptoms" | "list" | "ls" => Command::Symptoms {
                filter: (!rest.is_empty()).then(|| rest.to_lowercase()),
            },
            "select" | "add" => Command::Select {
                symptoms: split_symptoms(rest),
            },
            "deselect" | "remove" | "rm" => Command::Deselect {
                symptoms: split_symptoms(rest),
            },
            "selection" | "sel" => Command::Selection,
            "submit" | "go" => Command::Submit,
            "explain" | "why" => Command::Explain,
            "reset" => Command::Reset,
            "history" if rest.is_empty() => Command::History { limit: None },
            "history" => match rest.parse() {
                Ok(limit) => Command::History { limit: Some(limit) },
                Err(_) => Command::Unknown {
                    input: input.to_string(),
                },
            },
            "verbose" => match rest.to_lowercase().as_str() {
                "" | "on" | "1" | "true" => Command::Verbose { enable: true },
                "off" | "0" | "false" => Command::Verbose { enable: false },
                _ => Command::Unknown {
                    input: input.to_string(),
                },
            },
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown {
                input: input.to_string(),
            },
        }
    }

    /// Execute a command
    ///
    /// Returns true if REPL should continue, false if should exit
    pub fn execute(
        &mut self,
        command: Command,
        ctx: &AppContext,
        session: &mut Session,
        display: &DisplayManager,
    ) -> Result<bool> {
        debug!("Executing {:?}", command);
        match command {
            Command::Help => self.show_help(),
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                return Ok(false);
            }
            Command::Symptoms { filter } => {
                let symptoms: Vec<String> = ctx
                    .symptoms()
                    .iter()
                    .filter(|s| filter.as_deref().map_or(true, |f| s.contains(f)))
                    .cloned()
                    .collect();
                display.show_symptoms(&symptoms, session.selection_set());
            }
            Command::Select { symptoms } => {
                for input in symptoms {
                    match ctx.normalize_symptom(&input) {
                        Ok(symptom) => {
                            session.select(symptom);
                        }
                        Err(e) => display.show_warning(&e.to_string()),
                    }
                }
                display.show_selection(&session.selected());
            }
            Command::Deselect { symptoms } => {
                for input in symptoms {
                    let symptom = input.trim().to_lowercase();
                    if !session.deselect(&symptom) {
                        display.show_warning(&format!("{} is not selected", input.trim()));
                    }
                }
                display.show_selection(&session.selected());
            }
            Command::Toggle { symptoms } => {
                for input in symptoms {
                    match ctx.normalize_symptom(&input) {
                        Ok(symptom) => {
                            session.toggle(symptom);
                        }
                        Err(e) => display.show_warning(&e.to_string()),
                    }
                }
                display.show_selection(&session.selected());
            }
            Command::Selection => display.show_selection(&session.selected()),
            Command::Submit => self.submit(ctx, session, display),
            Command::Explain => {
                let selected = session.selected();
                if selected.is_empty() {
                    display.show_warning(&MedError::EmptySelection.to_string());
                } else {
                    display.show_explanation(ctx.model(), &selected);
                }
            }
            Command::Reset => {
                session.reset();
                println!("{}", "Selection cleared.".yellow());
            }
            Command::History { limit } => {
                match ctx.history().view(limit) {
                    Ok(lines) => display.show_history(&lines),
                    Err(e) => display.show_error(&e.to_string()),
                }
            }
            Command::Verbose { enable } => {
                self.verbose = enable;
                let status = if enable { "enabled" } else { "disabled" };
                println!("{}", format!("Verbose mode {}", status).cyan());
            }
            Command::Clear => display.clear_screen()?,
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
            }
        }
        Ok(true)
    }

    /// Resolve the current selection; failures leave the session untouched
    fn submit(&self, ctx: &AppContext, session: &mut Session, display: &DisplayManager) {
        let selected = session.selected();
        match ctx.recommend(&selected) {
            Ok(recommendation) => {
                display.show_recommendation(&recommendation);
                session.record(recommendation);
            }
            Err(MedError::EmptySelection) => {
                display.show_warning(&MedError::EmptySelection.to_string())
            }
            Err(e) => display.show_error(&e.to_string()),
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/symptoms [text]", "List symptoms (optionally filtered)"),
            ("/select <a, b>", "Tick symptoms"),
            ("/deselect <a, b>", "Untick symptoms"),
            ("/selection", "Show ticked symptoms"),
            ("/submit", "Recommend a medicine and log it"),
            ("/explain", "Show how each symptom votes"),
            ("/reset", "Clear selection and output"),
            ("/history [n]", "Show the log, or its last n entries"),
            ("/verbose [on|off]", "Toggle per-symptom votes"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit REPL"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Type symptoms separated by commas to tick/untick them");
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, enable: bool) {
        self.verbose = enable;
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}

/// Split comma-separated symptom input, dropping empty fragments
pub fn split_symptoms(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
