//! Reporting models: per-department salary statistics and headline stats.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Salary statistics for one department that has at least one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentReportEntry {
    /// The department name.
    pub department: String,
    /// Number of employees in the department.
    pub count: u64,
    /// Sum of salaries.
    pub total_salary: Decimal,
    /// Mean salary rounded to 2 decimal places.
    pub avg_salary: Decimal,
    /// Lowest salary.
    pub min_salary: Decimal,
    /// Highest salary.
    pub max_salary: Decimal,
}

/// Headline figures across all employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of employees on record.
    pub employee_count: u64,
    /// Sum of salaries rounded to 2 decimal places.
    pub total_salary: Decimal,
    /// Mean salary rounded to 2 decimal places; zero with no employees.
    pub avg_salary: Decimal,
}
