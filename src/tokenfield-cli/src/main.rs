//! Tokenfield CLI - interactive multi-value picker.
//!
//! Shows a token field over the given options, lets the user pick with the
//! keyboard or mouse, and prints the final selection as a JSON array on exit.

mod app;
mod cli;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, LogLevel};

/// Guard that ensures the log file is flushed when dropped.
struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Send logs to a file; stdout belongs to the terminal UI.
fn setup_file_logging(path: &Path, level: LogLevel) -> Result<LogGuard> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(LogGuard { _guard: guard })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match &cli.log_file {
        Some(path) => Some(setup_file_logging(path, cli.log_level)?),
        None => None,
    };

    let config = cli.to_config()?;
    tracing::info!(
        options = config.options.len(),
        allow_custom = config.allow_custom_options,
        "starting picker"
    );

    let selected = app::run(config)?;
    println!("{}", serde_json::to_string(&selected)?);
    Ok(())
}
