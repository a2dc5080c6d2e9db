//! Error types for the payroll ledger.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the store, calculator, exporter and API can surface.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the payroll ledger.
///
/// All fallible operations return this error type. The HTTP layer maps each
/// variant onto a status code and a user-visible message.
///
/// # Example
///
/// ```
/// use payroll_ledger::error::PayrollError;
///
/// let error = PayrollError::EmployeeNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Employee not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A department name was rejected.
    #[error("Invalid department: {message}")]
    InvalidDepartment {
        /// A description of what made the name invalid.
        message: String,
    },

    /// An employee referenced a department that is not registered.
    #[error("Department not registered: {name}")]
    UnknownDepartment {
        /// The department name that was referenced.
        name: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// No department exists with the given id.
    #[error("Department not found: {id}")]
    DepartmentNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// A department with the same name is already registered.
    #[error("Department already exists: {name}")]
    DuplicateDepartment {
        /// The duplicated name.
        name: String,
    },

    /// The department is still referenced by employees and cannot be deleted.
    #[error("Cannot delete department that has employees! ('{name}' has {employee_count})")]
    DepartmentInUse {
        /// The department name.
        name: String,
        /// How many employees reference it.
        employee_count: u64,
    },

    /// Writing the export file failed.
    #[error("Export error: {source}")]
    ExportFailed {
        /// The export destination.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The export completed without an I/O error but left no usable file.
    #[error("Error creating export file. Please try again.")]
    ExportVerificationFailed {
        /// The export destination.
        path: PathBuf,
    },

    /// No export has been written yet.
    #[error("No payroll export found at {}", .path.display())]
    ExportNotFound {
        /// The export destination.
        path: PathBuf,
    },

    /// A payroll figure fell outside the decimal range.
    #[error("Payroll calculation overflowed: {context}")]
    CalculationOverflow {
        /// Which figure overflowed, and for whom.
        context: String,
    },

    /// The storage engine reported an error.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// An unexpected internal failure (poisoned lock, aborted task).
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the failure.
        message: String,
    },
}

impl PayrollError {
    /// Shorthand for an [`PayrollError::InvalidEmployee`] error.
    pub fn invalid_employee(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEmployee {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`PayrollError::CalculationOverflow`] error.
    pub fn overflow(context: impl Into<String>) -> Self {
        Self::CalculationOverflow {
            context: context.into(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
