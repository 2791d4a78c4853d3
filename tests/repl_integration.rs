//! REPL integration tests
//!
//! Drives the interactive session through `handle_input` the way a user
//! would type, against the flu/cold fixture.

use medbuddy::{
    app::AppContext,
    cli::Config,
    repl::{
        commands::{is_command, split_symptoms, Command, CommandHandler},
        ReplConfig, ReplSession,
    },
};
use std::path::Path;
use tempfile::TempDir;

fn context(temp: &TempDir) -> AppContext {
    let mut config = Config::default();
    config.data.dataset_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/flu_cold.csv")
        .to_string_lossy()
        .to_string();
    config.history.path = temp
        .path()
        .join("history.txt")
        .to_string_lossy()
        .to_string();
    AppContext::bootstrap(&config).unwrap()
}

#[test]
fn test_typing_symptoms_toggles_checkboxes() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

    repl.handle_input("Cough, SNEEZING").unwrap();
    assert_eq!(repl.session().selected(), vec!["cough", "sneezing"]);

    repl.handle_input("cough").unwrap();
    assert_eq!(repl.session().selected(), vec!["sneezing"]);
}

#[test]
fn test_unknown_symptom_is_not_selected() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

    repl.handle_input("/select fever, chest pain").unwrap();
    assert_eq!(repl.session().selected(), vec!["fever"]);
}

#[test]
fn test_submit_then_history() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

    repl.handle_input("/select sneezing").unwrap();
    assert!(repl.handle_input("/submit").unwrap());
    assert!(repl.handle_input("/history 1").unwrap());

    let entries = ctx.history().entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].medicine, "antihistamine");
    assert_eq!(repl.session().submissions(), 1);
}

#[test]
fn test_empty_submit_is_reported_not_logged() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

    assert!(repl.handle_input("/submit").unwrap());
    assert!(!ctx.history().exists());
}

#[test]
fn test_explain_and_symptoms_commands_continue() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    let mut repl = ReplSession::new(&ctx, ReplConfig::default()).unwrap();

    assert!(repl.handle_input("/symptoms").unwrap());
    assert!(repl.handle_input("/symptoms ee").unwrap());
    assert!(repl.handle_input("/explain").unwrap());
    repl.handle_input("cough").unwrap();
    assert!(repl.handle_input("/explain").unwrap());
    assert!(repl.handle_input("/help").unwrap());
}

#[test]
fn test_command_helpers() {
    assert!(is_command("/exit"));
    assert_eq!(split_symptoms(" fever ,, cough "), vec!["fever", "cough"]);
    assert_eq!(CommandHandler::new().parse("/quit"), Command::Exit);
}
