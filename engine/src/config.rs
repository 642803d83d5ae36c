//! Runtime settings, read from the environment (and a `.env` file).
//!
//! | Variable                 | Values          | Default    |
//! |--------------------------|-----------------|------------|
//! | `MATCHSTATS_LOG_FORMAT`  | `text`, `json`  | `text`     |
//! | `MATCHSTATS_QUIET`       | `1`/`true`/`yes`| off        |
//! | `MATCHSTATS_DATE_FORMAT` | chrono format   | `%m/%d/%Y` |
//! | `MATCHSTATS_OUTPUT`      | `json`, `csv`   | `json`     |
//!
//! Command-line flags take precedence over all of these.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::transform::partition::DEFAULT_DATE_FORMAT;

pub const ENV_LOG_FORMAT: &str = "MATCHSTATS_LOG_FORMAT";
pub const ENV_QUIET: &str = "MATCHSTATS_QUIET";
pub const ENV_DATE_FORMAT: &str = "MATCHSTATS_DATE_FORMAT";
pub const ENV_OUTPUT: &str = "MATCHSTATS_OUTPUT";

/// Log echo format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Table output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Settings shared by all commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub log_format: LogFormat,
    pub quiet: bool,
    /// chrono format used to read date cells
    pub date_format: String,
    pub output_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
            quiet: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            output_format: OutputFormat::Json,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or unreadable values keep
    /// their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_checked(lookup).0
    }

    /// Like [`Settings::from_lookup`], also returning the rejected values.
    pub fn from_lookup_checked<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let mut problems = Vec::new();

        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            match raw.parse::<LogFormat>() {
                Ok(format) => settings.log_format = format,
                Err(e) => problems.push(format!("{}: {}", ENV_LOG_FORMAT, e)),
            }
        }

        if let Some(raw) = lookup(ENV_QUIET) {
            settings.quiet = is_truthy(&raw);
        }

        if let Some(raw) = lookup(ENV_DATE_FORMAT) {
            if raw.trim().is_empty() {
                problems.push(format!("{}: empty format", ENV_DATE_FORMAT));
            } else {
                settings.date_format = raw;
            }
        }

        if let Some(raw) = lookup(ENV_OUTPUT) {
            match raw.parse::<OutputFormat>() {
                Ok(format) => settings.output_format = format,
                Err(e) => problems.push(format!("{}: {}", ENV_OUTPUT, e)),
            }
        }

        (settings, problems)
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
