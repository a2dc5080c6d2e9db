//! Response types for the payroll ledger API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API, plus the small message bodies returned by mutating
//! endpoints.

use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::export::ExportReport;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            PayrollError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            ),
            PayrollError::InvalidDepartment { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_DEPARTMENT", message),
            ),
            PayrollError::UnknownDepartment { name } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_DEPARTMENT",
                    message,
                    format!("Register '{}' under /departments before assigning employees to it", name),
                ),
            ),
            PayrollError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            PayrollError::DepartmentNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("DEPARTMENT_NOT_FOUND", message),
            ),
            PayrollError::DuplicateDepartment { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_DEPARTMENT", message),
            ),
            PayrollError::DepartmentInUse {
                name,
                employee_count,
            } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "DEPARTMENT_IN_USE",
                    "Cannot delete department that has employees!",
                    format!("'{}' is assigned to {} employee(s)", name, employee_count),
                ),
            ),
            PayrollError::ExportFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("EXPORT_FAILED", message),
            ),
            PayrollError::ExportVerificationFailed { path } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "EXPORT_VERIFICATION_FAILED",
                    message,
                    format!("{} is missing or empty after writing", path.display()),
                ),
            ),
            PayrollError::ExportNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EXPORT_NOT_FOUND", message),
            ),
            PayrollError::CalculationOverflow { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CALCULATION_OVERFLOW",
                    message,
                    "A stored employee record holds figures too large to total",
                ),
            ),
            PayrollError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage error", message),
            ),
            PayrollError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("INTERNAL_ERROR", "Internal error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// A user-visible confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for a successful export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    /// Confirmation text.
    pub message: String,
    /// Where the file was written.
    pub path: PathBuf,
    /// Route the file can be downloaded from.
    pub download_url: String,
    /// Employee rows written.
    pub rows: usize,
    /// File size.
    pub bytes: u64,
    /// When the export finished.
    pub exported_at: DateTime<Utc>,
}

impl ExportResponse {
    /// Builds the response for a completed export.
    pub fn from_report(report: ExportReport, download_url: impl Into<String>) -> Self {
        Self {
            message: "Payroll data exported successfully!".to_string(),
            path: report.path,
            download_url: download_url.into(),
            rows: report.rows,
            bytes: report.bytes,
            exported_at: report.exported_at,
        }
    }
}

/// Response body for the health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: String,
    /// Crate version.
    pub version: String,
}
