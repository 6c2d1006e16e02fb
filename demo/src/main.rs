//! Avatar Studio Wizard Demo CLI
//!
//! Runs one or all of the avatar generator scenarios. Each scenario drives a
//! real wizard session (transition controller, simulated generation backend,
//! in-memory history) with mock media.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- full-flow
//!   cargo run -p demo -- guards
//!   cargo run -p demo -- failure
//!   cargo run -p demo -- --config my-generator.toml --json full-flow

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use studio_avatar::{
    scenarios::{failure, full_flow, guards},
    DEFAULT_GENERATOR_CONFIG,
};
use studio_contracts::error::{StudioError, StudioResult};
use studio_generate::GeneratorConfig;
use studio_history::InMemoryHistory;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Avatar Studio: a step-by-step avatar video wizard.
///
/// Each subcommand runs one or all of the wizard scenarios, showing the step
/// guards, the asynchronous generation lifecycle and the result history.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Avatar Studio wizard demo",
    long_about = "Runs Avatar Studio scenarios showing wizard step guards,\n\
                  simulated video generation with progress, and the result gallery."
)]
struct Cli {
    /// Generator settings (TOML). Defaults to the bundled configuration.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the final gallery of each scenario as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: Photo + Voice → Avatar Video (happy path).
    FullFlow,
    /// Scenario 2: Wizard Guards (every refused transition).
    Guards,
    /// Scenario 3: Failed and Cancelled Generations.
    Failure,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match load_config(cli.config.as_ref()) {
        Ok(config) => run(&cli.command, &config, cli.json).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> StudioResult<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_file(path),
        None => GeneratorConfig::from_toml_str(DEFAULT_GENERATOR_CONFIG),
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

async fn run(command: &Command, config: &GeneratorConfig, json: bool) -> StudioResult<()> {
    match command {
        Command::RunAll => {
            report(full_flow::run_scenario(config).await?, json)?;
            report(guards::run_scenario(config).await?, json)?;
            report(failure::run_scenario(config).await?, json)
        }
        Command::FullFlow => report(full_flow::run_scenario(config).await?, json),
        Command::Guards => report(guards::run_scenario(config).await?, json),
        Command::Failure => report(failure::run_scenario(config).await?, json),
    }
}

fn report(history: InMemoryHistory, json: bool) -> StudioResult<()> {
    if !json {
        return Ok(());
    }
    let rendered = serde_json::to_string_pretty(&history.export()).map_err(|e| {
        StudioError::HistoryWriteFailed {
            reason: format!("cannot serialize gallery: {}", e),
        }
    })?;
    println!("{}", rendered);
    println!();
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Avatar Studio");
    println!("Wizard Runtime Demo");
    println!("===================");
    println!();
    println!("Wizard steps:");
    println!("  [1] Upload Photo   needs a PNG or JPEG image");
    println!("  [2] Add Voice      needs an MP3 or WAV recording");
    println!("  [3] Customize      style, AI enhancement, premium quality");
    println!("  [4] Generate       asynchronous job with progress 0-100%");
    println!("  [5] Download       result is prepended to the gallery");
    println!();
}
