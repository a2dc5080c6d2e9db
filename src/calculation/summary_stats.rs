//! Headline statistics across all employees.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, SummaryStats};

use super::rounding::round_money;

/// Counts employees and totals and averages their salaries.
///
/// With no employees every figure is zero. Fails with
/// [`PayrollError::CalculationOverflow`] if the salary total overflows.
pub fn calculate_summary_stats(employees: &[Employee]) -> PayrollResult<SummaryStats> {
    if employees.is_empty() {
        return Ok(SummaryStats::default());
    }

    let count = employees.len() as u64;
    let total = employees
        .iter()
        .try_fold(Decimal::ZERO, |total, e| total.checked_add(e.salary))
        .ok_or_else(|| PayrollError::overflow("total salary"))?;

    Ok(SummaryStats {
        employee_count: count,
        total_salary: round_money(total),
        avg_salary: round_money(total / Decimal::from(count)),
    })
}
