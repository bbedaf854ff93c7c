//! # ATN Probe CLI
//!

use atn_core::{ComponentRegistry, ComponentSet};
use atn_probe::{run_probe, Fixture};
use atn_support::logging::{self, codes};
use atn_support::{log_error, log_info, LoadPreferences, LoggingPreferences};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Load ATN components and evaluate them against a token fixture
#[derive(Debug, Parser)]
#[command(name = "atn-probe", version, about)]
struct Cli {
    /// Component document (.toml or .json)
    #[arg(long)]
    config: PathBuf,

    /// Fixture of states and token cases (.json)
    #[arg(long)]
    fixture: PathBuf,

    /// Suppress registry and component loading messages
    #[arg(long)]
    quiet_load: bool,

    /// Emit log events as JSON lines instead of forwarding to the log facade
    #[arg(long)]
    structured: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = init_logging(cli.structured) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    log::debug!("{}", logging::get_system_diagnostics());

    let preferences = if cli.quiet_load {
        LoadPreferences::quiet()
    } else {
        LoadPreferences::default()
    };

    match run(&cli, preferences) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!(codes::system::INTERNAL_ERROR, "Probe failed", "error" => e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(structured: bool) -> Result<(), logging::LoggingError> {
    let mut preferences = LoggingPreferences::default();
    preferences.use_structured_logging |= structured;
    let min_level = preferences.min_log_level;

    if logging::config::init_runtime_preferences(preferences).is_err() {
        logging::safe_log_error(
            codes::system::INITIALIZATION_FAILURE,
            "Runtime logging preferences were already installed",
        );
    }

    if logging::config::use_structured_logging() {
        logging::init_global_logging()
    } else {
        let service = logging::service::create_facade_service(min_level);
        logging::init_global_logging_with_service(Arc::new(service))
    }
}

fn run(cli: &Cli, preferences: LoadPreferences) -> Result<String, Box<dyn std::error::Error>> {
    let registry = ComponentRegistry::with_builtins(preferences);
    let set = ComponentSet::from_path(&cli.config, &registry, preferences)?;

    log_info!(
        "Components loaded",
        "config" => cli.config.display(),
        "tests" => set.tests.len(),
        "classifiers" => set.classifiers.len(),
        "filters" => set.filters.len()
    );

    let fixture = Fixture::from_path(&cli.fixture)?;
    Ok(run_probe(&set, &fixture)?)
}
