//! Gross, tax and net pay calculation.
//!
//! `tax_amount = salary * tax_rate` and
//! `net_pay = salary - tax_amount + allowances`, computed in exact decimal
//! arithmetic. A run's summary is accumulated in the same pass that builds
//! its lines, from the unrounded line values.

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayrollLine, PayrollRun, PayrollSummary};

/// Calculates the payroll line for one employee.
///
/// An employee without a department, with a zero tax rate, or with a rate
/// above 1.0 (yielding negative net pay) all produce a line.
///
/// # Errors
///
/// Returns [`PayrollError::CalculationOverflow`] if tax or net pay falls
/// outside the decimal range.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::calculate_pay_line;
/// use payroll_ledger::models::Employee;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: 1,
///     name: "Ada Lovelace".to_string(),
///     position: "Engineer".to_string(),
///     department: Some("Engineering".to_string()),
///     salary: Decimal::from_str("5000").unwrap(),
///     tax_rate: Decimal::from_str("0.15").unwrap(),
///     allowances: Decimal::from_str("200").unwrap(),
/// };
///
/// let line = calculate_pay_line(&employee).unwrap();
/// assert_eq!(line.tax_amount, Decimal::from_str("750.00").unwrap());
/// assert_eq!(line.net_pay, Decimal::from_str("4450.00").unwrap());
/// ```
pub fn calculate_pay_line(employee: &Employee) -> PayrollResult<PayrollLine> {
    let overflow =
        |figure: &str| PayrollError::overflow(format!("{figure} for employee {}", employee.id));

    let gross_pay = employee.salary;
    let tax_amount = gross_pay
        .checked_mul(employee.tax_rate)
        .ok_or_else(|| overflow("tax amount"))?;
    let net_pay = gross_pay
        .checked_sub(tax_amount)
        .and_then(|net| net.checked_add(employee.allowances))
        .ok_or_else(|| overflow("net pay"))?;

    Ok(PayrollLine {
        employee_id: employee.id,
        name: employee.name.clone(),
        department: employee.department.clone(),
        gross_pay,
        tax_amount,
        allowances: employee.allowances,
        net_pay,
    })
}

/// Calculates a payroll run over `employees`, preserving their order.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::calculate_payroll;
///
/// let run = calculate_payroll(&[]).unwrap();
/// assert!(run.lines.is_empty());
/// assert!(run.summary.total_net.is_zero());
/// ```
///
/// # Errors
///
/// Fails with [`PayrollError::CalculationOverflow`] when any line or running
/// total overflows.
pub fn calculate_payroll(employees: &[Employee]) -> PayrollResult<PayrollRun> {
    let mut summary = PayrollSummary::default();
    let lines = employees
        .iter()
        .map(|employee| {
            let line = calculate_pay_line(employee)?;
            summary.accumulate(&line)?;
            Ok(line)
        })
        .collect::<PayrollResult<Vec<_>>>()?;

    Ok(PayrollRun { lines, summary })
}
