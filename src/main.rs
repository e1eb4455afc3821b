//! Autofill - fill web forms from a profile with a tool-calling LLM.
//!
//! Main entry point for the autofill CLI.

mod cli;
mod commands;
mod register;

use std::path::Path;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{error, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use autofill_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::{Cli, Commands};
use crate::commands::FillArgs;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path.map(Path::to_path_buf).or_else(ConfigLoader::discover) {
        Some(path) => ConfigLoader::load_or_default(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Initialize tracing with console output and optional daily log files.
///
/// Console output goes to stderr so command output on stdout stays clean.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let file_layer = match logging.dir_path() {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("autofill")
                .filename_suffix("log")
                .max_log_files(30)
                .build(&log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = LOG_GUARD.set(guard);
            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("{}: {}", err.path, err.message);
        }
        bail!("Invalid configuration ({} errors)", validation.errors.len());
    }

    match cli.command {
        Commands::Extract { page, json } => commands::extract(&config, &page, json),
        Commands::Prompt { page, profile } => {
            commands::prompt(&config, &page, profile.as_deref())
        }
        Commands::Fill {
            page,
            profile,
            provider,
            model,
            api_key,
        } => {
            let args = FillArgs {
                page,
                profile,
                provider,
                model,
                api_key,
            };
            commands::fill(&config, args).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("autofill.toml"))).unwrap();
        assert_eq!(config.executor.highlight_ms, 1500);
    }

    #[test]
    fn test_broken_config_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "provider = [").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }
}
