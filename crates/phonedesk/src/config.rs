//! Configuration management for phonedesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "phonedesk";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "documents.db";

/// Default collection holding user records.
pub const DEFAULT_COLLECTION: &str = "users";

/// Default phone rule: up to ten digits, matching a ten-key number pad.
pub const DEFAULT_PHONE_PATTERN: &str = r"^[0-9]{1,10}$";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PHONEDESK_`, sections split by `__`)
/// 2. TOML config file at `~/.config/phonedesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document store configuration.
    pub store: StoreConfig,
    /// Form configuration.
    pub form: FormConfig,
}

/// Which document store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-process store; contents are lost on exit.
    Memory,
    /// Local `SQLite` file.
    #[default]
    Sqlite,
    /// Remote `MongoDB` deployment (requires the `mongodb` feature).
    Mongodb,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Sqlite => write!(f, "sqlite"),
            Self::Mongodb => write!(f, "mongodb"),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend to open.
    pub backend: Backend,
    /// Path to the `SQLite` database file.
    /// Defaults to `~/.local/share/phonedesk/documents.db`
    pub database_path: Option<PathBuf>,
    /// Collection holding user records.
    pub collection: String,
    /// Connection string for the `mongodb` backend.
    pub mongodb_uri: Option<String>,
    /// Database name for the `mongodb` backend.
    pub mongodb_database: String,
}

/// Form-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Regex a phone number must match to be accepted.
    pub phone_pattern: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            database_path: None, // Will be resolved to default at runtime
            collection: DEFAULT_COLLECTION.to_string(),
            mongodb_uri: None,
            mongodb_database: DATA_DIR_NAME.to_string(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            phone_pattern: DEFAULT_PHONE_PATTERN.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Self::extract_from(config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge all configuration sources without validating the result.
    ///
    /// Callers that apply overrides must call [`Config::validate`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed.
    pub fn extract_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PHONEDESK_").split("__"));

        Ok(figment.extract()?)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.store.collection.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "store.collection must not be empty".to_string(),
            });
        }

        if self.store.backend == Backend::Mongodb {
            if self.store.mongodb_uri.as_deref().map_or(true, str::is_empty) {
                return Err(Error::ConfigValidation {
                    message: "store.mongodb_uri is required for the mongodb backend".to_string(),
                });
            }
            if self.store.mongodb_database.is_empty() {
                return Err(Error::ConfigValidation {
                    message: "store.mongodb_database must not be empty".to_string(),
                });
            }
        }

        if regex::Regex::new(&self.form.phone_pattern).is_err() {
            return Err(Error::ConfigValidation {
                message: format!("invalid regex pattern: {}", self.form.phone_pattern),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.store
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
