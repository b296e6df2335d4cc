use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LedgerError, Result};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LedgerConfig {
    pub node: NodeConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NodeConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_key_file")]
    pub key_file: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_key_file() -> String {
    "priv_account.json".to_string()
}

fn default_db_path() -> String {
    "./data/accounts".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig {
                log_level: default_log_level(),
                key_file: default_key_file(),
                db_path: default_db_path(),
            },
        }
    }
}

impl LedgerConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Strict load: a missing or malformed file is an error.
    pub fn load(path: &str) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("couldn't read {}: {}", path, e)))?;
        Self::from_toml(&s)
    }

    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match Self::load(path) {
                Ok(c) => {
                    info!("Config loaded from {}", path);
                    c
                }
                Err(e) => {
                    warn!("{}. Using defaults.", e);
                    Self::default()
                }
            }
        } else {
            Self::write_default(path)
        }
    }

    /// Returns the defaults, writing them to `path` only if nothing is there yet.
    pub fn write_default(path: &str) -> Self {
        let config = Self::default();
        if std::path::Path::new(path).exists() {
            return config;
        }
        info!("Config file not found at '{}'. Creating default.", path);
        match toml::to_string_pretty(&config) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    warn!("Couldn't write default config to {}: {}", path, e);
                }
            }
            Err(e) => warn!("Couldn't render default config: {}", e),
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = LedgerConfig::from_toml("[node]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.node.log_level, "debug");
        assert_eq!(config.node.key_file, default_key_file());
        assert_eq!(config.node.db_path, default_db_path());
    }

    #[test]
    fn test_malformed_config_is_error() {
        assert!(matches!(
            LedgerConfig::from_toml("node = 5"),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn test_load_or_default_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.toml");
        let path = path.to_str().unwrap();

        let config = LedgerConfig::load_or_default(path);
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(LedgerConfig::load(path).unwrap(), config);
    }

    #[test]
    fn test_write_default_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.toml");
        std::fs::write(&path, "node = 5").unwrap();
        let path = path.to_str().unwrap();

        assert_eq!(LedgerConfig::write_default(path), LedgerConfig::default());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "node = 5");
    }
}
