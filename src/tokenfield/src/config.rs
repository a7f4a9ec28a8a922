//! Construction-time configuration.
//!
//! A [`TokenFieldConfig`] can be built in code with the `with_*` setters or
//! loaded from TOML:
//!
//! ```toml
//! options = ["Red", "Green", "Blue"]
//! placeholder = "Pick colors"
//! allow_custom_options = true
//! initial_value = ["Red"]
//! keep_options_on_select = false
//! max_lines = 1
//! max_visible_options = 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

fn default_max_lines() -> usize {
    1
}

fn default_max_visible_options() -> usize {
    8
}

/// Configuration for one token field instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFieldConfig {
    /// Candidate catalog, in display order.
    #[serde(default)]
    pub options: Vec<String>,

    /// Hint shown in the empty text entry.
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Whether values outside the catalog may be added.
    #[serde(default)]
    pub allow_custom_options: bool,

    /// Tokens selected at creation.
    #[serde(default)]
    pub initial_value: Vec<String>,

    /// Keep selected options in the dropdown (allows duplicates).
    #[serde(default)]
    pub keep_options_on_select: bool,

    /// Rows the token line may wrap onto. `1` keeps it on a single line.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Dropdown rows shown before scrolling.
    #[serde(default = "default_max_visible_options")]
    pub max_visible_options: usize,
}

impl Default for TokenFieldConfig {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            placeholder: None,
            allow_custom_options: false,
            initial_value: Vec::new(),
            keep_options_on_select: false,
            max_lines: default_max_lines(),
            max_visible_options: default_max_visible_options(),
        }
    }
}

impl TokenFieldConfig {
    /// Create a configuration over the given catalog.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Allow or forbid custom values.
    pub fn with_custom_options(mut self, allow: bool) -> Self {
        self.allow_custom_options = allow;
        self
    }

    /// Seed the selection.
    pub fn with_initial_value<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_value = values.into_iter().map(Into::into).collect();
        self
    }

    /// Keep selected options offered in the dropdown.
    pub fn with_keep_options_on_select(mut self, keep: bool) -> Self {
        self.keep_options_on_select = keep;
        self
    }

    /// Set how many rows the token line may use.
    pub fn with_max_lines(mut self, lines: usize) -> Self {
        self.max_lines = lines;
        self
    }

    /// Set the dropdown height.
    pub fn with_max_visible_options(mut self, rows: usize) -> Self {
        self.max_visible_options = rows;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            options = config.options.len(),
            "loaded token field config"
        );
        Ok(config)
    }

    /// Check the values a controller cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_lines == 0 {
            return Err(ConfigError::Invalid {
                key: "max_lines",
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_visible_options == 0 {
            return Err(ConfigError::Invalid {
                key: "max_visible_options",
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(pos) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                key: "options",
                message: format!("entry {pos} is blank"),
            });
        }
        Ok(())
    }
}
