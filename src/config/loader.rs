//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for reading the YAML
//! configuration file and layering environment overrides on top of it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PayrollError, PayrollResult};

use super::types::PayrollConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "PAYROLL_CONFIG";
/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/payroll.yaml";

/// Overrides the listen address.
pub const BIND_ADDR_ENV: &str = "PAYROLL_BIND_ADDR";
/// Overrides the database file path.
pub const DATABASE_PATH_ENV: &str = "PAYROLL_DATABASE_PATH";
/// Overrides the export directory.
pub const EXPORT_DIR_ENV: &str = "PAYROLL_EXPORT_DIR";

/// Loads and provides access to the ledger configuration.
///
/// # Example
///
/// ```no_run
/// use payroll_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("Listening on {}", loader.config().server.bind_addr);
/// # Ok::<(), payroll_ledger::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid configuration YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })?;

        Ok(Self { config })
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        match Self::load(path) {
            Err(PayrollError::ConfigNotFound { path }) => {
                tracing::warn!(path = %path, "Configuration file not found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Loads configuration the way the binary does: from the file named by
    /// `PAYROLL_CONFIG` (or the default path), then environment overrides.
    pub fn from_env() -> PayrollResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut loader = Self::load_or_default(&path)?;
        loader.apply_overrides(|key| std::env::var(key).ok());
        Ok(loader)
    }

    /// Applies overrides looked up by variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.config.server.bind_addr = addr;
        }
        if let Some(path) = lookup(DATABASE_PATH_ENV) {
            self.config.storage.database_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(EXPORT_DIR_ENV) {
            self.config.export.directory = PathBuf::from(dir);
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}

impl From<PayrollConfig> for ConfigLoader {
    fn from(config: PayrollConfig) -> Self {
        Self { config }
    }
}
