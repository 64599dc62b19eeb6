//! tabrelay - copy form fields between browser tabs.
//!
//! Entry point for the tabrelay CLI.

mod app;
mod cli;
mod cmd_config;
mod cmd_copy;
mod cmd_preset;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tabrelay_config::{AppConfig, ConfigLoader, ConfigValidator};

use crate::app::{App, CliResult};
use crate::cli::{Cli, Commands};
use crate::cmd_config::handle_config_command;
use crate::cmd_copy::{handle_copy_command, handle_tabs_command};
use crate::cmd_preset::handle_preset_command;

/// Console output goes to stderr so command output on stdout stays clean.
/// The file layer writes daily-rotated logs under `<storage dir>/logs`.
fn init_tracing(config: &AppConfig, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { "debug" } else { config.logging.level.as_str() };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = if config.logging.file {
        let log_dir = config.storage.resolved_dir().join("logs");
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("tabrelay")
            .filename_suffix("log")
            .max_log_files(7)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Flushes pending lines when the process exits.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

fn load_config(path: &Path) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    let validation = ConfigValidator::validate(&config);
    if !validation.is_valid() {
        let problems: Vec<String> = validation
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect();
        return Err(format!("Invalid settings in {}: {}", path.display(), problems.join("; ")).into());
    }
    Ok(config)
}

async fn run(cli: Cli, config: AppConfig) -> CliResult {
    let app = App::open(config).await?;

    match cli.command {
        Commands::Config { action } => handle_config_command(&app, action).await,
        Commands::Preset { action } => handle_preset_command(&app, action).await,
        Commands::Tabs => handle_tabs_command(&app).await,
        Commands::Copy { preset, file } => {
            handle_copy_command(&app, preset.as_deref(), file.as_deref()).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ConfigLoader::default_path);
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&config, cli.verbose) {
        eprintln!("Warning: file logging disabled: {}", e);
    }
    ConfigValidator::validate(&config).log_warnings();
    debug!("Settings loaded from {}", config_path.display());

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
