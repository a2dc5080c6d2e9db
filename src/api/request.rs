//! Request types for the payroll ledger API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollResult;
use crate::models::EmployeeDraft;

/// Request body for creating or updating an employee.
///
/// `tax_rate` is a fraction (0.15 = 15%) on both create and update. It and
/// `allowances` may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Department name; omitted, null or blank means none.
    #[serde(default)]
    pub department: Option<String>,
    /// Gross pay base.
    pub salary: Decimal,
    /// Tax rate as a fraction; defaults to the configured rate.
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    /// Untaxed additions; defaults to zero.
    #[serde(default)]
    pub allowances: Option<Decimal>,
}

impl EmployeeRequest {
    /// Validates the request, filling omitted values from defaults.
    pub fn into_draft(self, default_tax_rate: Decimal) -> PayrollResult<EmployeeDraft> {
        EmployeeDraft::new(
            self.name,
            self.position,
            self.department,
            self.salary,
            self.tax_rate.unwrap_or(default_tax_rate),
            self.allowances.unwrap_or(Decimal::ZERO),
        )
    }
}

/// Request body for registering a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRequest {
    /// The department name.
    pub name: String,
}
