//! Per-department salary statistics.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Department, DepartmentReportEntry, Employee};

use super::rounding::round_money;

/// Builds salary statistics for every department that has employees.
///
/// Entries follow the order of `departments` (registry insertion order).
/// Departments no employee references are left out entirely, and employees
/// whose department is not in `departments` are not counted anywhere.
///
/// Fails with [`PayrollError::CalculationOverflow`] if a department's
/// salary total overflows.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::build_department_report;
/// use payroll_ledger::models::{Department, Employee};
/// use rust_decimal::Decimal;
///
/// let departments = vec![
///     Department { id: 1, name: "Engineering".to_string() },
///     Department { id: 2, name: "Marketing".to_string() },
/// ];
/// let employee = |id, salary| Employee {
///     id,
///     name: format!("E{id}"),
///     position: "Engineer".to_string(),
///     department: Some("Engineering".to_string()),
///     salary: Decimal::new(salary, 0),
///     tax_rate: Decimal::new(15, 2),
///     allowances: Decimal::ZERO,
/// };
///
/// let report =
///     build_department_report(&departments, &[employee(1, 5000), employee(2, 7000)]).unwrap();
/// assert_eq!(report.len(), 1);
/// assert_eq!(report[0].count, 2);
/// assert_eq!(report[0].avg_salary, Decimal::new(6000, 0));
/// ```
pub fn build_department_report(
    departments: &[Department],
    employees: &[Employee],
) -> PayrollResult<Vec<DepartmentReportEntry>> {
    departments
        .iter()
        .filter_map(|department| department_entry(&department.name, employees).transpose())
        .collect()
}

fn department_entry(
    name: &str,
    employees: &[Employee],
) -> PayrollResult<Option<DepartmentReportEntry>> {
    let mut salaries = employees
        .iter()
        .filter(|e| e.department.as_deref() == Some(name))
        .map(|e| e.salary);

    let Some(first) = salaries.next() else {
        return Ok(None);
    };
    let (count, total, min, max) = salaries
        .try_fold(
            (1u64, first, first, first),
            |(count, total, min, max), salary| {
                let total = total.checked_add(salary)?;
                Some((count + 1, total, min.min(salary), max.max(salary)))
            },
        )
        .ok_or_else(|| PayrollError::overflow(format!("total salary for {name}")))?;

    Ok(Some(DepartmentReportEntry {
        department: name.to_string(),
        count,
        total_salary: total,
        avg_salary: round_money(total / Decimal::from(count)),
        min_salary: min,
        max_salary: max,
    }))
}
