//! Core data models for the payroll ledger.
//!
//! Stored records ([`Employee`], [`Department`]) and the derived figures
//! computed from them on demand.

mod department;
mod employee;
mod payroll;
mod report;

pub use department::{Department, DepartmentDeletion, DepartmentHeadcount};
pub use employee::{DEFAULT_TAX_RATE, Employee, EmployeeDraft, MAX_AMOUNT, MAX_TAX_RATE};
pub use payroll::{PayrollLine, PayrollRun, PayrollSummary};
pub use report::{DepartmentReportEntry, SummaryStats};
