//! Configuration Module
//!
//! Handles loading configuration from:
//! 1. $COHORT_CONFIG, ~/.cohort/config.toml or ./config.toml (first found)
//! 2. Environment variables (override TOML values)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{env, fs};

use crate::contract::DecodePolicy;

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = ".cohort";

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CohortConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "./cohort-db".to_string()
}

/// Which crypto oracle backs the contract
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OracleMode {
    #[default]
    Http,
    Mock,
}

/// Oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub mode: OracleMode,
    #[serde(default = "default_oracle_url")]
    pub url: String,
    #[serde(default = "default_oracle_timeout")]
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            mode: OracleMode::Http,
            url: default_oracle_url(),
            timeout_secs: default_oracle_timeout(),
        }
    }
}

fn default_oracle_url() -> String {
    "http://127.0.0.1:7070".to_string()
}

fn default_oracle_timeout() -> u64 {
    30
}

/// Ledger read behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// "strict" (default) or "lenient" for ledgers holding undecodable rows
    #[serde(default)]
    pub decode_policy: DecodePolicy,
}

impl CohortConfig {
    /// Load configuration from the first config file found, with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(config_path) = Self::find_config_file() {
            log::info!("Loading config from: {}", config_path.display());
            let contents = fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;
            config = toml::from_str(&contents).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?;
        } else {
            log::info!("No config file found, using defaults and environment variables");
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check COHORT_CONFIG env var
        if let Ok(path) = env::var("COHORT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check ~/.cohort/config.toml
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. Check ./config.toml (current directory)
        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        None
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Database
        if let Some(v) = lookup("COHORT_DB_PATH") {
            self.database.path = v;
        }

        // API
        if let Some(v) = lookup("COHORT_API_HOST") {
            self.api.host = v;
        }
        if let Some(v) = lookup("COHORT_API_PORT") {
            if let Ok(port) = v.parse() {
                self.api.port = port;
            }
        }

        // Oracle
        if let Some(v) = lookup("COHORT_ORACLE_MODE") {
            match v.to_lowercase().as_str() {
                "http" => self.oracle.mode = OracleMode::Http,
                "mock" => self.oracle.mode = OracleMode::Mock,
                _ => log::warn!("Ignoring unknown COHORT_ORACLE_MODE: {}", v),
            }
        }
        if let Some(v) = lookup("COHORT_ORACLE_URL") {
            self.oracle.url = v;
        }
        if let Some(v) = lookup("COHORT_ORACLE_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.oracle.timeout_secs = n;
            }
        }

        // Ledger
        if let Some(v) = lookup("COHORT_DECODE_POLICY") {
            match v.to_lowercase().as_str() {
                "strict" => self.ledger.decode_policy = DecodePolicy::Strict,
                "lenient" => self.ledger.decode_policy = DecodePolicy::Lenient,
                _ => log::warn!("Ignoring unknown COHORT_DECODE_POLICY: {}", v),
            }
        }
    }

    /// Address the HTTP host binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Per-user config file path (`~/.cohort/config.toml`)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        let sample = Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: "./cohort-db".to_string(),
            },
            oracle: OracleConfig {
                mode: OracleMode::Mock,
                url: "http://127.0.0.1:7070".to_string(),
                timeout_secs: 30,
            },
            ledger: LedgerConfig {
                decode_policy: DecodePolicy::Strict,
            },
        };

        toml::to_string_pretty(&sample).unwrap_or_default()
    }
}
