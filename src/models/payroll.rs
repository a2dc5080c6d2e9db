//! Payroll result models.
//!
//! This module contains the [`PayrollLine`] computed for each employee, the
//! [`PayrollSummary`] aggregated over a run, and the [`PayrollRun`] pairing
//! the two. None of these are persisted; they are rebuilt on every request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Gross, tax and net pay for a single employee.
///
/// Values keep full precision. Rounding to cents happens only when a line is
/// rendered for display or export.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::PayrollLine;
/// use rust_decimal::Decimal;
///
/// let line = PayrollLine {
///     employee_id: 1,
///     name: "Ada Lovelace".to_string(),
///     department: Some("Engineering".to_string()),
///     gross_pay: Decimal::new(5000, 0),
///     tax_amount: Decimal::new(750, 0),
///     allowances: Decimal::new(200, 0),
///     net_pay: Decimal::new(4450, 0),
/// };
/// assert_eq!(line.net_pay, line.gross_pay - line.tax_amount + line.allowances);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The employee this line was computed for.
    pub employee_id: i64,
    /// The employee's name at computation time.
    pub name: String,
    /// The employee's department, if any.
    pub department: Option<String>,
    /// Salary before deductions.
    pub gross_pay: Decimal,
    /// `gross_pay * tax_rate`.
    pub tax_amount: Decimal,
    /// Untaxed additions.
    pub allowances: Decimal,
    /// `gross_pay - tax_amount + allowances`.
    pub net_pay: Decimal,
}

/// Totals across every line of a payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Sum of gross pay.
    pub total_gross: Decimal,
    /// Sum of tax withheld.
    pub total_tax: Decimal,
    /// Sum of net pay.
    pub total_net: Decimal,
}

impl PayrollSummary {
    /// Adds a line's unrounded values to the running totals.
    ///
    /// On overflow the totals are left unchanged.
    pub fn accumulate(&mut self, line: &PayrollLine) -> PayrollResult<()> {
        let add = |total: Decimal, value: Decimal, figure: &str| {
            total.checked_add(value).ok_or_else(|| {
                PayrollError::overflow(format!("{figure} after employee {}", line.employee_id))
            })
        };

        let total_gross = add(self.total_gross, line.gross_pay, "total gross pay")?;
        let total_tax = add(self.total_tax, line.tax_amount, "total tax")?;
        let total_net = add(self.total_net, line.net_pay, "total net pay")?;

        self.total_gross = total_gross;
        self.total_tax = total_tax;
        self.total_net = total_net;
        Ok(())
    }
}

/// The lines of a payroll run in employee order, plus their summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// One line per employee, in input order.
    pub lines: Vec<PayrollLine>,
    /// Totals over `lines`.
    pub summary: PayrollSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(gross: &str, tax: &str, net: &str) -> PayrollLine {
        PayrollLine {
            employee_id: 1,
            name: "Test".to_string(),
            department: None,
            gross_pay: dec(gross),
            tax_amount: dec(tax),
            allowances: Decimal::ZERO,
            net_pay: dec(net),
        }
    }

    #[test]
    fn test_summary_starts_at_zero() {
        let summary = PayrollSummary::default();
        assert_eq!(summary.total_gross, Decimal::ZERO);
        assert_eq!(summary.total_tax, Decimal::ZERO);
        assert_eq!(summary.total_net, Decimal::ZERO);
    }

    #[test]
    fn test_accumulate_adds_unrounded_values() {
        let mut summary = PayrollSummary::default();
        summary.accumulate(&line("100.005", "15.00075", "84.00425")).unwrap();
        summary.accumulate(&line("100.005", "15.00075", "84.00425")).unwrap();
        assert_eq!(summary.total_gross, dec("200.010"));
        assert_eq!(summary.total_tax, dec("30.0015"));
        assert_eq!(summary.total_net, dec("168.0085"));
    }

    #[test]
    fn test_accumulate_overflow_leaves_totals_unchanged() {
        let mut summary = PayrollSummary::default();
        summary.accumulate(&line("1", "0", "1")).unwrap();

        let mut huge = line("1", "0", "1");
        huge.net_pay = Decimal::MAX;
        let err = summary.accumulate(&huge).unwrap_err();

        assert!(matches!(err, PayrollError::CalculationOverflow { .. }));
        assert_eq!(summary.total_gross, dec("1"));
        assert_eq!(summary.total_net, dec("1"));
    }

    #[test]
    fn test_line_serializes_missing_department_as_null() {
        let json = serde_json::to_value(line("1", "0", "1")).unwrap();
        assert!(json["department"].is_null());
    }
}
