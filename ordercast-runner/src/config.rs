//! Serializable evaluation configuration.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cutoff dates are written `YYYY-MM-DD` in configs and CLI flags.
pub const CUTOFF_FORMAT: &str = "%Y-%m-%d";

/// Errors from config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("evaluation.window must be >= 1")]
    InvalidWindow,

    #[error("evaluation.cutoff_date '{value}' is not YYYY-MM-DD")]
    InvalidCutoff {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Complete evaluation configuration.
///
/// TOML shape:
///
/// ```toml
/// [data]
/// csv_path = "sales_data_sample.csv"
///
/// [evaluation]
/// cutoff_date = "2005-01-01"
/// window = 30        # optional, default 30
///
/// [calendar]
/// years = [2003, 2004, 2005]   # optional, default: years spanned by the data
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalConfig {
    pub data: DataConfig,
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Path to the order CSV.
    pub csv_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationConfig {
    /// Train/test cutoff date (YYYY-MM-DD); the test range starts on this
    /// date.
    pub cutoff_date: String,

    /// Trailing moving-average window in days (default 30).
    #[serde(default = "default_window")]
    pub window: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalendarConfig {
    /// Holiday calendar years. Defaults to the years spanned by the data.
    pub years: Option<Vec<i32>>,
}

fn default_window() -> usize {
    30
}

impl EvalConfig {
    /// Config with the given CSV path and cutoff, defaults elsewhere.
    pub fn new(csv_path: impl Into<String>, cutoff_date: impl Into<String>) -> Self {
        Self {
            data: DataConfig {
                csv_path: csv_path.into(),
            },
            evaluation: EvaluationConfig {
                cutoff_date: cutoff_date.into(),
                window: default_window(),
            },
            calendar: CalendarConfig::default(),
        }
    }

    /// Load and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse and validate a TOML config string.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The parsed cutoff date.
    pub fn cutoff(&self) -> Result<NaiveDate, ConfigError> {
        NaiveDate::parse_from_str(&self.evaluation.cutoff_date, CUTOFF_FORMAT).map_err(|source| {
            ConfigError::InvalidCutoff {
                value: self.evaluation.cutoff_date.clone(),
                source,
            }
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.evaluation.window == 0 {
            return Err(ConfigError::InvalidWindow);
        }
        self.cutoff()?;
        Ok(())
    }
}
