//! HTTP API module for the payroll ledger.
//!
//! This module provides the JSON endpoints operators use to manage
//! employees and departments, compute payroll, export it, and read reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{EXPORT_ROUTE, create_router};
pub use request::{DepartmentRequest, EmployeeRequest};
pub use response::{ApiError, ApiErrorResponse, ExportResponse, HealthResponse, MessageResponse};
pub use state::AppState;
