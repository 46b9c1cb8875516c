//! Configuration for searches, the dashboard and logging.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QFF_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use qff_compile::MAX_OPTIMIZATION_LEVEL;

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Grover run parameters
    #[serde(default)]
    pub search: SearchConfig,

    /// Web dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parameters of a single search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of measurement shots
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Grover iterations (oracle + diffuser rounds)
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// How many states the report lists
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Seed for the directory and the sampler; random when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Transpiler optimization level (0 or 1)
    #[serde(default = "default_optimization_level")]
    pub optimization_level: u8,
}

/// Dashboard server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Bind address (e.g., "127.0.0.1:8501")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Finished runs kept for downloads
    #[serde(default = "default_max_stored_runs")]
    pub max_stored_runs: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: console or json
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_shots() -> u32 {
    1024
}

fn default_iterations() -> u32 {
    6
}

fn default_top_k() -> usize {
    10
}

fn default_optimization_level() -> u8 {
    1
}

fn default_bind_address() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_max_stored_runs() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            shots: default_shots(),
            iterations: default_iterations(),
            top_k: default_top_k(),
            seed: None,
            optimization_level: default_optimization_level(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            bind_address: default_bind_address(),
            max_stored_runs: default_max_stored_runs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl FinderConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: FinderConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: env > file > defaults.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            FinderConfig::default()
        };

        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QFF_*` environment overrides.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// A numeric variable that does not parse is an error naming the variable.
    pub fn merge_vars(
        mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = var("QFF_SHOTS") {
            self.search.shots = parse_var("QFF_SHOTS", &v)?;
        }
        if let Some(v) = var("QFF_ITERATIONS") {
            self.search.iterations = parse_var("QFF_ITERATIONS", &v)?;
        }
        if let Some(v) = var("QFF_SEED") {
            self.search.seed = Some(parse_var("QFF_SEED", &v)?);
        }
        if let Some(v) = var("QFF_BIND") {
            self.dashboard.bind_address = v;
        }
        if let Some(v) = var("QFF_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = var("QFF_LOG_FORMAT") {
            self.logging.format = v;
        }
        Ok(self)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }

        if self.search.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "top_k must be greater than 0".to_string(),
            ));
        }

        if self.search.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(ConfigError::ValidationError(format!(
                "optimization_level must be at most {MAX_OPTIMIZATION_LEVEL}, got {}",
                self.search.optimization_level
            )));
        }

        if self.dashboard.max_stored_runs == 0 {
            return Err(ConfigError::ValidationError(
                "max_stored_runs must be greater than 0".to_string(),
            ));
        }

        self.bind_address()?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {other}"
                )));
            }
        }

        Ok(())
    }

    /// Get the parsed dashboard address.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        self.dashboard.bind_address.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "Invalid bind address: {}",
                self.dashboard.bind_address
            ))
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::ValidationError(format!("{name}={value:?} is invalid: {e}")))
}
