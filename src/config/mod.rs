//! Configuration loading and management for the payroll ledger.
//!
//! Configuration comes from a YAML file (server address, database path,
//! seed departments, export location, default tax rate) with a handful of
//! environment overrides.
//!
//! # Example
//!
//! ```no_run
//! use payroll_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Exporting to {}", config.config().export.path().display());
//! ```

mod loader;
mod types;

pub use loader::{
    BIND_ADDR_ENV, CONFIG_PATH_ENV, ConfigLoader, DATABASE_PATH_ENV, DEFAULT_CONFIG_PATH,
    EXPORT_DIR_ENV,
};
pub use types::{
    DEFAULT_SEED_DEPARTMENTS, ExportConfig, PayrollConfig, PayrollDefaults, ServerConfig,
    StorageConfig,
};
