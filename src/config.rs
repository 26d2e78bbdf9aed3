//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::table::{DataSource, TextEncoding};

/// Airline on-time dataset used by the flight delay dashboard
pub const DEFAULT_FLIGHTS_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/airline_data.csv";

/// Historical automobile sales dataset
pub const DEFAULT_AUTOS_SOURCE: &str = "historical_automobile_sales.csv";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub datasets: DatasetsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File the configuration was read from
    #[serde(skip)]
    pub path: Option<PathBuf>,

    /// Problems met while resolving, logged once tracing is up
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_ws_connections")]
    pub max_ws_connections: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_max_ws_connections() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_ws_connections: default_max_ws_connections(),
        }
    }
}

/// Where and how to read one CSV dataset
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetConfig {
    /// File path, or an http(s) URL
    pub source: String,

    /// Unset keeps the encoding the dashboard reads its dataset with
    #[serde(default)]
    pub encoding: Option<TextEncoding>,
}

impl DatasetConfig {
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source)
    }
}

/// Datasets backing the dashboards
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetsConfig {
    #[serde(default = "default_flights")]
    pub flights: DatasetConfig,

    #[serde(default = "default_autos")]
    pub autos: DatasetConfig,
}

fn default_flights() -> DatasetConfig {
    DatasetConfig {
        source: DEFAULT_FLIGHTS_SOURCE.to_string(),
        encoding: Some(TextEncoding::Latin1),
    }
}

fn default_autos() -> DatasetConfig {
    DatasetConfig {
        source: DEFAULT_AUTOS_SOURCE.to_string(),
        encoding: Some(TextEncoding::Utf8),
    }
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            flights: default_flights(),
            autos: default_autos(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, or search the default locations.
    ///
    /// An explicit path that cannot be read is an error; the default
    /// locations fall back to built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("statboard").join("config.toml")),
            Some(PathBuf::from("/etc/statboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        let mut warnings = Vec::new();
        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(mut config) => {
                        warnings.append(&mut config.warnings);
                        config.warnings = warnings;
                        return config;
                    }
                    Err(e) => warnings.push(e.to_string()),
                }
            }
        }

        let mut config = Self::from_env();
        warnings.append(&mut config.warnings);
        config.warnings = warnings;
        config
    }

    /// Report where the configuration came from. Call after tracing is set up.
    pub fn log_origin(&self) {
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
        match &self.path {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `STATBOARD_*` overrides read through `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = lookup("STATBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("STATBOARD_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => self
                    .warnings
                    .push(format!("Ignoring invalid STATBOARD_PORT: {}", port)),
            }
        }

        // Dataset overrides
        if let Some(source) = lookup("STATBOARD_FLIGHTS_SOURCE") {
            self.datasets.flights.source = source;
        }
        if let Some(source) = lookup("STATBOARD_AUTOS_SOURCE") {
            self.datasets.autos.source = source;
        }

        // Logging overrides
        if let Some(level) = lookup("STATBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("STATBOARD_LOG_FORMAT") {
            match format.parse() {
                Ok(f) => self.logging.format = f,
                Err(e) => self
                    .warnings
                    .push(format!("Ignoring STATBOARD_LOG_FORMAT: {}", e)),
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# statboard configuration
#
# Environment variables override these settings:
# - STATBOARD_HOST
# - STATBOARD_PORT
# - STATBOARD_FLIGHTS_SOURCE
# - STATBOARD_AUTOS_SOURCE
# - STATBOARD_LOG_LEVEL
# - STATBOARD_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8050

# Allowed CORS origins (empty allows any origin)
cors_origins = []

# Maximum concurrent WebSocket connections
max_ws_connections = 1000

[datasets.flights]
# CSV file path or http(s) URL
source = "{flights}"

# Text encoding: utf-8 or latin-1
encoding = "latin-1"

[datasets.autos]
source = "{autos}"
encoding = "utf-8"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        flights = DEFAULT_FLIGHTS_SOURCE,
        autos = DEFAULT_AUTOS_SOURCE,
    )
}
