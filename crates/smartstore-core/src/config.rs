//! Configuration loading and typed config structures for `SmartStore`.
//!
//! The configuration lives in `smartstore-config.yaml` at the project root.
//! Every section and field has a default, so an empty file (or no file at
//! all) gives the three-shelf demo store on port 8000.

use std::path::Path;

use serde::Deserialize;
use smartstore_types::{ShelfLabel, Traffic};

use crate::autosim::DEFAULT_INTERVAL_SECONDS;
use crate::store::default_shelves;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "SMARTSTORE_CONFIG";

/// Config file read when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "smartstore-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An override value could not be parsed.
    #[error("invalid value for {name}: {message}")]
    InvalidOverride {
        /// The environment variable.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// The shelf set.
    #[serde(default)]
    pub store: ShelfSetConfig,

    /// HTTP bind address.
    #[serde(default)]
    pub server: ServerSection,

    /// Random seed and auto-simulation defaults.
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StoreConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override the server section:
    /// - `SMARTSTORE_HOST` overrides `server.host`
    /// - `SMARTSTORE_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for a malformed override.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.server.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string without looking at the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// The configured shelves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShelfSetConfig {
    /// Shelves in any order; the store keys them by label.
    #[serde(default = "default_shelf_configs")]
    pub shelves: Vec<ShelfConfig>,
}

impl ShelfSetConfig {
    /// `(label, traffic)` pairs for [`StoreState::new`](crate::store::StoreState::new).
    pub fn shelf_pairs(&self) -> Vec<(ShelfLabel, Traffic)> {
        self.shelves
            .iter()
            .map(|s| (ShelfLabel::new(s.label.clone()), s.traffic))
            .collect()
    }
}

impl Default for ShelfSetConfig {
    fn default() -> Self {
        Self {
            shelves: default_shelf_configs(),
        }
    }
}

/// One shelf entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShelfConfig {
    /// Unique label, e.g. `"A"`.
    pub label: String,
    /// Footfall tag.
    #[serde(default)]
    pub traffic: Traffic,
}

/// HTTP bind settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSection {
    /// Apply `SMARTSTORE_HOST` / `SMARTSTORE_PORT` if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if the port is not a
    /// valid `u16`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SMARTSTORE_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("SMARTSTORE_PORT") {
            self.port = val.parse().map_err(|e| ConfigError::InvalidOverride {
                name: "SMARTSTORE_PORT",
                message: format!("{e}"),
            })?;
        }
        Ok(())
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Randomness and auto-simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationSection {
    /// Seed for the shelf draws. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Start with auto-simulation switched on.
    #[serde(default)]
    pub auto_simulate: bool,
    /// Seconds between automatic empties (1 to 10).
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            seed: None,
            auto_simulate: false,
            interval_seconds: default_interval_seconds(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_shelf_configs() -> Vec<ShelfConfig> {
    default_shelves()
        .into_iter()
        .map(|(label, traffic)| ShelfConfig {
            label: label.to_owned(),
            traffic,
        })
        .collect()
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8000
}

const fn default_interval_seconds() -> u64 {
    DEFAULT_INTERVAL_SECONDS
}

fn default_log_level() -> String {
    "info".to_owned()
}
