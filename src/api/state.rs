//! Application state for the payroll ledger API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::PayrollConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::export::PayrollExporter;
use crate::store::PayrollStore;

/// Shared application state.
///
/// Holds the store behind its traits, the loaded configuration, and the
/// exporter built from it.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PayrollStore>,
    config: Arc<PayrollConfig>,
    exporter: Arc<PayrollExporter>,
}

impl AppState {
    /// Creates application state from a configuration and a store.
    pub fn new(config: PayrollConfig, store: Arc<dyn PayrollStore>) -> Self {
        let exporter = PayrollExporter::new(config.export.path());
        Self {
            store,
            config: Arc::new(config),
            exporter: Arc::new(exporter),
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the payroll exporter.
    pub fn exporter(&self) -> &PayrollExporter {
        &self.exporter
    }

    /// Runs a blocking store operation on the blocking thread pool.
    pub async fn with_store<T, F>(&self, op: F) -> PayrollResult<T>
    where
        F: FnOnce(&dyn PayrollStore) -> PayrollResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| PayrollError::Internal {
                message: format!("store task failed: {e}"),
            })?
    }

    /// Runs a blocking exporter operation on the blocking thread pool.
    pub async fn with_exporter<T, F>(&self, op: F) -> PayrollResult<T>
    where
        F: FnOnce(&PayrollExporter) -> PayrollResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let exporter = Arc::clone(&self.exporter);
        tokio::task::spawn_blocking(move || op(exporter.as_ref()))
            .await
            .map_err(|e| PayrollError::Internal {
                message: format!("export task failed: {e}"),
            })?
    }

    /// Runs a blocking operation that needs both the store and the exporter.
    pub async fn with_store_and_exporter<T, F>(&self, op: F) -> PayrollResult<T>
    where
        F: FnOnce(&dyn PayrollStore, &PayrollExporter) -> PayrollResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let exporter = Arc::clone(&self.exporter);
        tokio::task::spawn_blocking(move || op(store.as_ref(), exporter.as_ref()))
            .await
            .map_err(|e| PayrollError::Internal {
                message: format!("export task failed: {e}"),
            })?
    }
}
