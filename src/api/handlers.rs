//! HTTP request handlers for the payroll ledger API.
//!
//! This module contains the handler functions for all API endpoints and the
//! router that wires them together.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_department_report, calculate_payroll, calculate_summary_stats};
use crate::error::PayrollError;
use crate::models::{
    Department, DepartmentDeletion, DepartmentHeadcount, DepartmentReportEntry, Employee,
    PayrollRun, SummaryStats,
};

use super::request::{DepartmentRequest, EmployeeRequest};
use super::response::{
    ApiError, ApiErrorResponse, ExportResponse, HealthResponse, MessageResponse,
};
use super::state::AppState;

/// Route the latest export can be downloaded from.
pub const EXPORT_ROUTE: &str = "/payroll/export";

type HandlerResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/summary", get(summary_handler))
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/employees/:id",
            get(get_employee_handler)
                .put(update_employee_handler)
                .delete(delete_employee_handler),
        )
        .route(
            "/departments",
            get(list_departments_handler).post(create_department_handler),
        )
        .route("/departments/:id", delete(delete_department_handler))
        .route("/payroll", get(payroll_handler))
        .route(
            EXPORT_ROUTE,
            post(export_handler).get(download_export_handler),
        )
        .route("/reports/departments", get(department_report_handler))
        .with_state(state)
}

/// Logs a failed request and converts the error for the response.
fn failure(correlation_id: Uuid, error: PayrollError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Converts a JSON body rejection into a 400 response.
fn rejected(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for GET /summary: employee count, total and average salary.
async fn summary_handler(State(state): State<AppState>) -> HandlerResult<Json<SummaryStats>> {
    let correlation_id = Uuid::new_v4();
    let employees = state
        .with_store(|store| store.list_employees())
        .await
        .map_err(|e| failure(correlation_id, e))?;

    calculate_summary_stats(&employees)
        .map(Json)
        .map_err(|e| failure(correlation_id, e))
}

/// Handler for GET /employees.
async fn list_employees_handler(
    State(state): State<AppState>,
) -> HandlerResult<Json<Vec<Employee>>> {
    let correlation_id = Uuid::new_v4();
    let employees = state
        .with_store(|store| store.list_employees())
        .await
        .map_err(|e| failure(correlation_id, e))?;

    Ok(Json(employees))
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<Employee>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create employee request");

    let Json(request) = payload.map_err(|r| rejected(correlation_id, r))?;
    let draft = request
        .into_draft(state.config().payroll.default_tax_rate)
        .map_err(|e| failure(correlation_id, e))?;

    let employee = state
        .with_store(move |store| store.create_employee(&draft))
        .await
        .map_err(|e| failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = employee.id,
        "Employee added successfully"
    );
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for GET /employees/:id.
async fn get_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Json<Employee>> {
    let correlation_id = Uuid::new_v4();
    state
        .with_store(move |store| store.get_employee(id))
        .await
        .and_then(|found| found.ok_or(PayrollError::EmployeeNotFound { id }))
        .map(Json)
        .map_err(|e| failure(correlation_id, e))
}

/// Handler for PUT /employees/:id.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> HandlerResult<Json<Employee>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = id, "Processing update employee request");

    let Json(request) = payload.map_err(|r| rejected(correlation_id, r))?;
    let draft = request
        .into_draft(state.config().payroll.default_tax_rate)
        .map_err(|e| failure(correlation_id, e))?;

    let employee = state
        .with_store(move |store| store.update_employee(id, &draft))
        .await
        .and_then(|found| found.ok_or(PayrollError::EmployeeNotFound { id }))
        .map_err(|e| failure(correlation_id, e))?;

    info!(correlation_id = %correlation_id, employee_id = id, "Employee updated successfully");
    Ok(Json(employee))
}

/// Handler for DELETE /employees/:id.
async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Json<MessageResponse>> {
    let correlation_id = Uuid::new_v4();
    let deleted = state
        .with_store(move |store| store.delete_employee(id))
        .await
        .map_err(|e| failure(correlation_id, e))?;

    if !deleted {
        return Err(failure(correlation_id, PayrollError::EmployeeNotFound { id }));
    }

    info!(correlation_id = %correlation_id, employee_id = id, "Employee deleted");
    Ok(Json(MessageResponse::new("Employee deleted successfully!")))
}

/// Handler for GET /departments: the registry with headcounts.
async fn list_departments_handler(
    State(state): State<AppState>,
) -> HandlerResult<Json<Vec<DepartmentHeadcount>>> {
    let correlation_id = Uuid::new_v4();
    let headcounts = state
        .with_store(|store| store.department_headcounts())
        .await
        .map_err(|e| failure(correlation_id, e))?;

    Ok(Json(headcounts))
}

/// Handler for POST /departments.
async fn create_department_handler(
    State(state): State<AppState>,
    payload: Result<Json<DepartmentRequest>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<Department>)> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| rejected(correlation_id, r))?;

    let department = state
        .with_store(move |store| store.create_department(&request.name))
        .await
        .map_err(|e| failure(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        department = %department.name,
        "Department added successfully"
    );
    Ok((StatusCode::CREATED, Json(department)))
}

/// Handler for DELETE /departments/:id.
///
/// Rejected with 409 while any employee still belongs to the department.
async fn delete_department_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Json<MessageResponse>> {
    let correlation_id = Uuid::new_v4();
    let outcome = state
        .with_store(move |store| store.delete_department(id))
        .await
        .map_err(|e| failure(correlation_id, e))?;

    match outcome {
        DepartmentDeletion::Deleted(department) => {
            info!(
                correlation_id = %correlation_id,
                department = %department.name,
                "Department deleted"
            );
            Ok(Json(MessageResponse::new("Department deleted successfully!")))
        }
        DepartmentDeletion::InUse {
            department,
            employee_count,
        } => Err(failure(
            correlation_id,
            PayrollError::DepartmentInUse {
                name: department.name,
                employee_count,
            },
        )),
        DepartmentDeletion::NotFound => Err(failure(
            correlation_id,
            PayrollError::DepartmentNotFound { id },
        )),
    }
}

/// Handler for GET /payroll: a payroll line per employee plus totals.
async fn payroll_handler(State(state): State<AppState>) -> HandlerResult<Json<PayrollRun>> {
    let correlation_id = Uuid::new_v4();
    let employees = state
        .with_store(|store| store.list_employees())
        .await
        .map_err(|e| failure(correlation_id, e))?;

    let run = calculate_payroll(&employees).map_err(|e| failure(correlation_id, e))?;
    info!(
        correlation_id = %correlation_id,
        employees = run.lines.len(),
        total_gross = %run.summary.total_gross,
        total_net = %run.summary.total_net,
        "Payroll calculated"
    );
    Ok(Json(run))
}

/// Handler for POST /payroll/export: writes the CSV export.
async fn export_handler(State(state): State<AppState>) -> HandlerResult<Json<ExportResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll export");

    let report = state
        .with_store_and_exporter(|store, exporter| {
            let employees = store.list_employees()?;
            exporter.export(&employees)
        })
        .await
        .map_err(|e| failure(correlation_id, e))?;

    Ok(Json(ExportResponse::from_report(report, EXPORT_ROUTE)))
}

/// Handler for GET /payroll/export: downloads the latest export.
async fn download_export_handler(
    State(state): State<AppState>,
) -> HandlerResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let contents = state
        .with_exporter(|exporter| exporter.read())
        .await
        .map_err(|e| failure(correlation_id, e))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config().export.file_name
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        contents,
    ))
}

/// Handler for GET /reports/departments.
async fn department_report_handler(
    State(state): State<AppState>,
) -> HandlerResult<Json<Vec<DepartmentReportEntry>>> {
    let correlation_id = Uuid::new_v4();
    let (departments, employees) = state
        .with_store(|store| Ok((store.list_departments()?, store.list_employees()?)))
        .await
        .map_err(|e| failure(correlation_id, e))?;

    build_department_report(&departments, &employees)
        .map(Json)
        .map_err(|e| failure(correlation_id, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollConfig;
    use crate::store::SqliteStore;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let store = SqliteStore::open_in_memory().expect("in-memory store");
        store
            .seed_departments(&["Engineering", "Marketing"])
            .expect("seed");
        AppState::new(PayrollConfig::default(), Arc::new(store))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_version() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::post("/employees")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::post("/employees")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"name": "Ada", "salary": "100"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("position"));
    }

    #[tokio::test]
    async fn test_get_unknown_employee_returns_404() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(Request::get("/employees/404").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_empty_payroll_has_zero_totals() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(Request::get("/payroll").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let run: PayrollRun = serde_json::from_value(body_json(response).await).unwrap();
        assert!(run.lines.is_empty());
        assert!(run.summary.total_gross.is_zero());
    }
}
