//! MedBuddy - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::debug;
use medbuddy::{
    app::AppContext,
    cli::{Args, Commands, Config, Verbosity},
    doctor::Doctor,
    repl::{DisplayManager, ReplConfig, ReplSession},
};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate()?;

    let verbosity = Verbosity::from_config(&config.display.default_verbosity);
    init_logging(verbosity);
    if !config.display.color_output {
        colored::control::set_override(false);
    }
    debug!("Effective configuration: {:?}", config);

    match args.command.clone().unwrap_or(Commands::Start) {
        Commands::Start => {
            let ctx = bootstrap(&config, verbosity);
            run_repl(&ctx, &config, verbosity)?;
        }
        Commands::Recommend { symptoms, json } => {
            let ctx = bootstrap(&config, verbosity);
            run_recommend(&ctx, &symptoms, json, verbosity)?;
        }
        Commands::Symptoms => {
            let ctx = bootstrap(&config, verbosity);
            let display = DisplayManager::new().with_columns(config.display.symptom_columns);
            display.show_symptoms(ctx.symptoms(), &Default::default());
        }
        Commands::History { limit } => {
            show_history(&config, limit)?;
        }
        Commands::Doctor => {
            run_doctor(&config);
        }
        Commands::Config => {
            show_config(&config, verbosity);
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the verbosity flags pick the level
fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_level().as_str()),
    )
    .format_timestamp(None)
    .init();
}

/// Load the dataset and fit the model, or terminate startup
fn bootstrap(config: &Config, verbosity: Verbosity) -> AppContext {
    let spinner = (verbosity.show_progress() && config.display.show_progress).then(|| {
        DisplayManager::new().start_loading(&format!(
            "Loading {} and fitting association model...",
            config.dataset_path().display()
        ))
    });

    let result = AppContext::bootstrap(config);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match result {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            eprintln!("\nPoint --data at a CSV with columns: disease, symptoms, medicine, uses, dosage, side_effects");
            std::process::exit(2);
        }
    }
}

fn run_repl(ctx: &AppContext, config: &Config, verbosity: Verbosity) -> Result<()> {
    let mut repl = ReplSession::new(ctx, ReplConfig::from_config(config, verbosity.show_votes()))?;
    repl.show_welcome(env!("CARGO_PKG_VERSION"));
    repl.run()
}

fn run_recommend(
    ctx: &AppContext,
    inputs: &[String],
    json: bool,
    verbosity: Verbosity,
) -> Result<()> {
    let mut selection = Vec::new();
    for input in inputs.iter().flat_map(|s| s.split(',')) {
        if input.trim().is_empty() {
            continue;
        }
        selection.push(ctx.normalize_symptom(input)?);
    }
    selection.sort();
    selection.dedup();

    match ctx.recommend(&selection) {
        Ok(recommendation) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                let mut display = DisplayManager::new();
                display.set_show_votes(verbosity.show_votes());
                display.show_recommendation(&recommendation);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn show_history(config: &Config, limit: Option<usize>) -> Result<()> {
    let log = medbuddy::history::HistoryLog::new(config.history_path());
    DisplayManager::new().show_history(&log.view(limit)?);
    Ok(())
}

fn run_doctor(config: &Config) {
    let doctor = Doctor::new(config.dataset_path(), config.history_path());
    let checks = doctor.run_diagnostics();
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(config: &Config, verbosity: Verbosity) {
    println!("\n{}\n", "MedBuddy Configuration".bold().cyan());

    println!("Data:");
    println!("  Dataset:   {}", config.dataset_path().display());
    println!();

    println!("History:");
    println!("  File:      {}", config.history_path().display());
    println!();

    println!("Display:");
    println!("  Verbosity: {:?}", verbosity);
    println!("  Progress:  {}", if config.display.show_progress { "enabled" } else { "disabled" });
    println!("  Colors:    {}", if config.display.color_output { "enabled" } else { "disabled" });
    println!("  Columns:   {}", config.display.symptom_columns);
    println!();

    if let Some(path) = Config::default_path() {
        println!("Config file: {}", path.display());
        println!();
    }
}
