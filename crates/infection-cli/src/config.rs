use infection_core::model::deck::InfectionDeck;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_LOG_FILE: &str = "infection-odds.jsonl";

/// Session configuration loaded from YAML. Every block is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TrackerConfig {
    /// Replaces the standard roster when present.
    #[serde(default)]
    pub roster: Option<Vec<RosterEntry>>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TrackerConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: TrackerConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if let Some(roster) = self.roster.as_mut() {
            validate_roster(roster)?;
        }
        self.logging.normalize();
        Ok(())
    }

    /// Deck the session starts from.
    pub fn deck(&self) -> InfectionDeck {
        match self.roster.as_ref() {
            Some(roster) => InfectionDeck::from_roster(
                roster.iter().map(|entry| (entry.name.as_str(), entry.total)),
            ),
            None => InfectionDeck::standard(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub total: u32,
}

/// Logging configuration defaults to human-readable output on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.level().is_none() {
            self.tracing_level = default_tracing_level();
        }
        if self.log_file.trim().is_empty() {
            self.log_file = default_log_file();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.log_file)
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn validate_roster(roster: &mut [RosterEntry]) -> Result<(), ValidationError> {
    if roster.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "roster".to_string(),
            message: "roster must list at least one city".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (index, entry) in roster.iter_mut().enumerate() {
        let trimmed = entry.name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("roster[{index}].name"),
                message: "city name must not be empty".to_string(),
            });
        }
        entry.name = trimmed.to_string();

        if !seen.insert(entry.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "roster".to_string(),
                message: format!("city '{}' listed more than once", entry.name),
            });
        }
    }

    Ok(())
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
