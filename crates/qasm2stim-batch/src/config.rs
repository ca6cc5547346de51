//! Configuration for qasm2stim.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QASM2STIM_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! Command-line flags are applied on top by the CLI.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use qasm2stim_core::{LineEnding, TranslateOptions};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do when one file in a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the whole batch at the first failure.
    #[default]
    Abort,
    /// Log the failure, skip the file and keep converting.
    Isolate,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Abort => write!(f, "abort"),
            ErrorPolicy::Isolate => write!(f, "isolate"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "isolate" | "keep-going" => Ok(ErrorPolicy::Isolate),
            other => Err(format!(
                "unknown error policy: '{other}'; valid values are: abort, isolate"
            )),
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Engine output options
    #[serde(default)]
    pub translate: TranslateOptions,

    /// Directory conversion settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Directory conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Behavior when a file fails to convert
    #[serde(default)]
    pub error_policy: ErrorPolicy,

    /// Extension of files picked up from the input directory
    #[serde(default = "default_input_extension")]
    pub input_extension: String,

    /// Extension given to the written Stim files
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Memory-map inputs instead of reading them into a buffer
    #[serde(default = "default_true")]
    pub memory_map: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter: "trace", "debug", "info", "warn", "error".
    /// An explicit `-v` on the command line takes precedence.
    #[serde(default)]
    pub level: Option<String>,
}

fn default_input_extension() -> String {
    "qasm".to_string()
}

fn default_output_extension() -> String {
    "stim".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            error_policy: ErrorPolicy::default(),
            input_extension: default_input_extension(),
            output_extension: default_output_extension(),
            memory_map: true,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge `QASM2STIM_*` environment variables into this configuration.
    fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Only variables that are set change
    /// the corresponding fields.
    pub fn merge_vars(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("QASM2STIM_LINE_ENDING") {
            self.translate.line_ending = v
                .parse::<LineEnding>()
                .map_err(ConfigError::ValidationError)?;
        }
        if let Some(v) = lookup("QASM2STIM_ERROR_POLICY") {
            self.batch.error_policy = v
                .parse::<ErrorPolicy>()
                .map_err(ConfigError::ValidationError)?;
        }
        if let Some(v) = lookup("QASM2STIM_MEMORY_MAP") {
            self.batch.memory_map = match v.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(ConfigError::ValidationError(format!(
                        "QASM2STIM_MEMORY_MAP must be a boolean, got '{other}'"
                    )));
                }
            };
        }
        if let Some(v) = lookup("QASM2STIM_LOG_LEVEL") {
            self.logging.level = Some(v);
        }
        Ok(self)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (what, ext) in [
            ("input_extension", &self.batch.input_extension),
            ("output_extension", &self.batch.output_extension),
        ] {
            if ext.is_empty() {
                return Err(ConfigError::ValidationError(format!("{what} cannot be empty")));
            }
            if ext.contains('.') || ext.contains('/') || ext.contains('\\') {
                return Err(ConfigError::ValidationError(format!(
                    "{what} must be a bare extension without dots or separators, got '{ext}'"
                )));
            }
        }

        if self.batch.input_extension == self.batch.output_extension {
            return Err(ConfigError::ValidationError(
                "input_extension and output_extension must differ".to_string(),
            ));
        }

        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {level}. Must be one of: {}",
                    LOG_LEVELS.join(", ")
                )));
            }
        }

        Ok(())
    }
}
