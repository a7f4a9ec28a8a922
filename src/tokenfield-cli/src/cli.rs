//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tokenfield::TokenFieldConfig;

/// Log level for the `--log-file` output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show commits, removals and blur decisions
    Debug,
    /// Show every intent and cursor move
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Pick values from a list in the terminal and print them as JSON.
#[derive(Debug, Parser)]
#[command(name = "tokenfield", version, about, long_about = None)]
pub struct Cli {
    /// Values offered in the dropdown
    #[arg(value_name = "OPTION")]
    pub options: Vec<String>,

    /// Additional value to offer (repeatable)
    #[arg(long = "option", short = 'o', value_name = "VALUE")]
    pub extra_options: Vec<String>,

    /// TOML file with the field configuration
    #[arg(long, short = 'c', value_name = "FILE", env = "TOKENFIELD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Allow values that are not in the list
    #[arg(long)]
    pub allow_custom: bool,

    /// Keep picked values in the dropdown so they can be picked again
    #[arg(long)]
    pub keep_options: bool,

    /// Hint shown while the entry is empty
    #[arg(long)]
    pub placeholder: Option<String>,

    /// Values selected at start, comma separated
    #[arg(long, short = 'i', value_delimiter = ',', value_name = "VALUES")]
    pub initial: Vec<String>,

    /// Rows the token line may wrap onto
    #[arg(long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for --log-file; RUST_LOG takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Cli {
    /// Build the field configuration: the config file first, flags on top.
    pub fn to_config(&self) -> Result<TokenFieldConfig> {
        let mut config = match &self.config {
            Some(path) => TokenFieldConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => TokenFieldConfig::default(),
        };

        config
            .options
            .extend(self.options.iter().chain(&self.extra_options).cloned());
        if self.allow_custom {
            config.allow_custom_options = true;
        }
        if self.keep_options {
            config.keep_options_on_select = true;
        }
        if let Some(placeholder) = &self.placeholder {
            config.placeholder = Some(placeholder.clone());
        }
        if !self.initial.is_empty() {
            config.initial_value = self.initial.clone();
        }
        if let Some(lines) = self.max_lines {
            config.max_lines = lines;
        }

        config.validate()?;
        if config.options.is_empty() && !config.allow_custom_options {
            bail!("Nothing to pick from: pass some options or --allow-custom");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tokenfield").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_and_flag_options() {
        let config = parse(&["Red", "Green", "-o", "Blue"]).to_config().unwrap();
        assert_eq!(config.options, vec!["Red", "Green", "Blue"]);
        assert!(!config.allow_custom_options);
    }

    #[test]
    fn test_flags_map_to_config() {
        let config = parse(&[
            "Red",
            "--allow-custom",
            "--keep-options",
            "--placeholder",
            "Colors",
            "--initial",
            "Red,Teal",
            "--max-lines",
            "2",
        ])
        .to_config()
        .unwrap();
        assert!(config.allow_custom_options);
        assert!(config.keep_options_on_select);
        assert_eq!(config.placeholder.as_deref(), Some("Colors"));
        assert_eq!(config.initial_value, vec!["Red", "Teal"]);
        assert_eq!(config.max_lines, 2);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.toml");
        std::fs::write(&path, "options = [\"a\"]\nplaceholder = \"file\"\n").unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let config = parse(&["b", "--config", &path_arg, "--placeholder", "flag"])
            .to_config()
            .unwrap();
        assert_eq!(config.options, vec!["a", "b"]);
        assert_eq!(config.placeholder.as_deref(), Some("flag"));
    }

    #[test]
    fn test_empty_catalog_needs_custom() {
        assert!(parse(&[]).to_config().is_err());
        assert!(parse(&["--allow-custom"]).to_config().is_ok());
    }

    #[test]
    fn test_zero_lines_rejected() {
        let err = parse(&["a", "--max-lines", "0"]).to_config().unwrap_err();
        assert!(err.to_string().contains("max_lines"));
    }

    #[test]
    fn test_log_level_default() {
        let cli = parse(&["a"]);
        assert_eq!(cli.log_level, LogLevel::Info);
        assert_eq!(LogLevel::Trace.as_filter_str(), "trace");
    }
}
