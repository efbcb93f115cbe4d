//! Configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{info, warn};

/// Configuration for the task manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Storage backend type
    pub storage_backend: StorageKind,

    /// JSON file used by the file backend
    pub data_file: String,

    /// Database file used by the sqlite backend
    pub database_path: String,

    /// Base URL of the remote SQL service
    pub remote_url: Option<String>,

    /// Request timeout for the remote backend in seconds
    pub remote_timeout_secs: u64,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
}

/// Storage backend types supported by the task manager
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// In-memory storage (non-persistent)
    #[default]
    Memory,
    /// JSON file on local disk
    #[serde(alias = "json")]
    File,
    /// Local SQLite database
    #[serde(alias = "sqlite3")]
    Sqlite,
    /// SQL service reached over HTTP
    #[serde(alias = "http")]
    Remote,
}

impl std::str::FromStr for StorageKind {
    type Err = crate::TaskManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "remote" | "http" => Ok(Self::Remote),
            _ => Err(crate::TaskManagerError::ConfigError(format!(
                "Invalid STORAGE_BACKEND: {}",
                s
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8055,
            storage_backend: StorageKind::Memory,
            data_file: "tasks.json".to_string(),
            database_path: "tasks.db".to_string(),
            remote_url: None,
            remote_timeout_secs: 10,
            shutdown_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Create a configuration for the given backend with default values
    pub fn new(storage_backend: StorageKind) -> Self {
        Self {
            storage_backend,
            ..Default::default()
        }
    }

    /// Load configuration from file, environment variables, or defaults
    pub fn load() -> crate::Result<Self> {
        if let Ok(config_path) = env::var("TASK_MANAGER_CONFIG") {
            info!("Loading config from TASK_MANAGER_CONFIG: {}", config_path);
            return Self::from_file(&config_path);
        }

        let default_paths = [
            "config.yaml",
            "config.toml",
            "config/config.yaml",
            "config/config.toml",
        ];

        for path in default_paths {
            if Path::new(path).exists() {
                info!("Loading config from: {}", path);
                return Self::from_file(path);
            }
        }

        if let Some(config) = Self::from_env()? {
            info!("Loaded config from environment variables");
            return Ok(config);
        }

        warn!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .map_err(|e| {
                crate::TaskManagerError::ConfigError(format!("Failed to load config file: {}", e))
            })?;

        let config: Config = settings.try_deserialize().map_err(|e| {
            crate::TaskManagerError::ConfigError(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `TASK_MANAGER_*` environment variables
    ///
    /// Returns `Ok(None)` when none of them is set.
    pub fn from_env() -> crate::Result<Option<Self>> {
        let mut config = Self::default();
        let mut found_any = false;

        if let Ok(val) = env::var("TASK_MANAGER_HOST") {
            config.host = val;
            found_any = true;
        }

        if let Ok(val) = env::var("TASK_MANAGER_PORT") {
            config.port = parse_var("PORT", &val)?;
            found_any = true;
        }

        if let Ok(val) = env::var("TASK_MANAGER_STORAGE_BACKEND") {
            config.storage_backend = val.parse()?;
            found_any = true;
        }

        if let Ok(val) = env::var("TASK_MANAGER_DATA_FILE") {
            config.data_file = val;
            found_any = true;
        }

        if let Ok(val) = env::var("TASK_MANAGER_DATABASE_PATH") {
            config.database_path = val;
            found_any = true;
        }

        if let Ok(val) = env::var("TASK_MANAGER_REMOTE_URL") {
            config.remote_url = Some(val);
            found_any = true;
        }

        if let Ok(val) = env::var("TASK_MANAGER_REMOTE_TIMEOUT_SECS") {
            config.remote_timeout_secs = parse_var("REMOTE_TIMEOUT_SECS", &val)?;
            found_any = true;
        }

        if let Ok(val) = env::var("TASK_MANAGER_SHUTDOWN_TIMEOUT_SECS") {
            config.shutdown_timeout_secs = parse_var("SHUTDOWN_TIMEOUT_SECS", &val)?;
            found_any = true;
        }

        if !found_any {
            return Ok(None);
        }

        config.validate()?;
        Ok(Some(config))
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.port == 0 {
            return Err(crate::TaskManagerError::ConfigError(
                "Port must be greater than 0".to_string(),
            ));
        }

        if self.shutdown_timeout_secs == 0 {
            return Err(crate::TaskManagerError::ConfigError(
                "Shutdown timeout must be greater than 0".to_string(),
            ));
        }

        match self.storage_backend {
            StorageKind::Memory => {}
            StorageKind::File if self.data_file.trim().is_empty() => {
                return Err(crate::TaskManagerError::ConfigError(
                    "data_file must be set for the file backend".to_string(),
                ));
            }
            StorageKind::Sqlite if self.database_path.trim().is_empty() => {
                return Err(crate::TaskManagerError::ConfigError(
                    "database_path must be set for the sqlite backend".to_string(),
                ));
            }
            StorageKind::Remote => {
                if self.remote_url.as_deref().map_or(true, |url| url.trim().is_empty()) {
                    return Err(crate::TaskManagerError::ConfigError(
                        "remote_url must be set for the remote backend".to_string(),
                    ));
                }
                if self.remote_timeout_secs == 0 {
                    return Err(crate::TaskManagerError::ConfigError(
                        "Remote timeout must be greater than 0".to_string(),
                    ));
                }
            }
            StorageKind::File | StorageKind::Sqlite => {}
        }

        Ok(())
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, val: &str) -> crate::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    val.parse().map_err(|e| {
        crate::TaskManagerError::ConfigError(format!("Invalid {}: {}", name, e))
    })
}
