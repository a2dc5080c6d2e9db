//! Employee model and the validated draft used to create or update one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// The tax rate applied when none is supplied (15%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Largest salary or allowance accepted (one quadrillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Largest tax rate magnitude accepted (10000%).
pub const MAX_TAX_RATE: Decimal = Decimal::ONE_HUNDRED;

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Identifier assigned by the store on creation.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Name of the department the employee belongs to, if any.
    pub department: Option<String>,
    /// Gross pay base.
    pub salary: Decimal,
    /// Tax rate as a fraction (0.15 = 15%).
    pub tax_rate: Decimal,
    /// Untaxed additions, added after tax.
    pub allowances: Decimal,
}

/// Field values for an employee that have passed validation.
///
/// Drafts are the only way to hand employee data to the store, so every
/// persisted record has a non-empty name and position, salary and
/// allowances between zero and [`MAX_AMOUNT`], and a tax rate within
/// [`MAX_TAX_RATE`] of zero.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::EmployeeDraft;
/// use rust_decimal::Decimal;
///
/// let draft = EmployeeDraft::new(
///     "Ada Lovelace",
///     "Engineer",
///     Some("Engineering".to_string()),
///     Decimal::new(5000, 0),
///     Decimal::new(15, 2),
///     Decimal::new(200, 0),
/// )
/// .unwrap();
/// assert_eq!(draft.name, "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    /// Full name, trimmed.
    pub name: String,
    /// Job title, trimmed.
    pub position: String,
    /// Department name, trimmed; blank input becomes `None`.
    pub department: Option<String>,
    /// Gross pay base, never negative.
    pub salary: Decimal,
    /// Tax rate as a fraction. Rates above 1.0 are accepted up to
    /// [`MAX_TAX_RATE`].
    pub tax_rate: Decimal,
    /// Untaxed additions, never negative.
    pub allowances: Decimal,
}

impl EmployeeDraft {
    /// Validates raw field values and builds a draft.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::InvalidEmployee`] naming the first field that
    /// is blank, negative or out of range.
    pub fn new(
        name: impl AsRef<str>,
        position: impl AsRef<str>,
        department: Option<String>,
        salary: Decimal,
        tax_rate: Decimal,
        allowances: Decimal,
    ) -> PayrollResult<Self> {
        let name = required_text("name", name.as_ref())?;
        let position = required_text("position", position.as_ref())?;

        bounded_amount("salary", salary)?;
        bounded_amount("allowances", allowances)?;
        if tax_rate.abs() > MAX_TAX_RATE {
            return Err(PayrollError::invalid_employee(
                "tax_rate",
                format!("must be between -{MAX_TAX_RATE} and {MAX_TAX_RATE}"),
            ));
        }

        let department = department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            name,
            position,
            department,
            salary,
            tax_rate,
            allowances,
        })
    }

    /// Attaches a store-assigned id, producing the stored record.
    pub fn into_employee(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            position: self.position,
            department: self.department,
            salary: self.salary,
            tax_rate: self.tax_rate,
            allowances: self.allowances,
        }
    }
}

fn bounded_amount(field: &str, value: Decimal) -> PayrollResult<()> {
    if value < Decimal::ZERO {
        return Err(PayrollError::invalid_employee(field, "must not be negative"));
    }
    if value > MAX_AMOUNT {
        return Err(PayrollError::invalid_employee(
            field,
            format!("must not exceed {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

fn required_text(field: &str, value: &str) -> PayrollResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PayrollError::invalid_employee(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
