//! Configuration types for the payroll ledger.
//!
//! These structures are deserialized from the YAML configuration file. Every
//! section and field has a default, so a partial file (or no file at all)
//! yields a working configuration.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::DEFAULT_TAX_RATE;

/// Departments inserted into an empty registry on first start.
pub const DEFAULT_SEED_DEPARTMENTS: [&str; 5] =
    ["Engineering", "Marketing", "HR", "Sales", "Finance"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub storage: StorageConfig,
    /// Export file settings.
    pub export: ExportConfig,
    /// Payroll defaults.
    pub payroll: PayrollDefaults,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the SQLite database file.
    pub database_path: PathBuf,
    /// Departments to create when the registry is empty.
    pub seed_departments: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("payroll_system/database.db"),
            seed_departments: DEFAULT_SEED_DEPARTMENTS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

/// Export file settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the export is written into; created if missing.
    pub directory: PathBuf,
    /// File name of the export inside `directory`.
    pub file_name: String,
}

impl ExportConfig {
    /// Full path of the export file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("static"),
            file_name: "payroll_export.csv".to_string(),
        }
    }
}

/// Payroll defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PayrollDefaults {
    /// Tax rate (as a fraction) for employees submitted without one.
    pub default_tax_rate: Decimal,
}

impl Default for PayrollDefaults {
    fn default() -> Self {
        Self {
            default_tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_section() {
        let config = PayrollConfig::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:5000");
        assert_eq!(
            config.storage.database_path,
            PathBuf::from("payroll_system/database.db")
        );
        assert_eq!(
            config.export.path(),
            PathBuf::from("static").join("payroll_export.csv")
        );
        assert_eq!(config.payroll.default_tax_rate, Decimal::new(15, 2));
        assert_eq!(config.storage.seed_departments.len(), 5);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "export:\n  directory: /tmp/exports\n";
        let config: PayrollConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.export.directory, PathBuf::from("/tmp/exports"));
        assert_eq!(config.export.file_name, "payroll_export.csv");
        assert_eq!(config.server.bind_addr, "127.0.0.1:5000");
    }

    #[test]
    fn test_tax_rate_parses_from_string() {
        let yaml = "payroll:\n  default_tax_rate: \"0.2\"\n";
        let config: PayrollConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.payroll.default_tax_rate, Decimal::new(2, 1));
    }
}
