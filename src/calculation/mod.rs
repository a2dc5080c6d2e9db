//! Calculation logic for the payroll ledger.
//!
//! This module contains the payroll calculator (gross, tax and net pay per
//! employee plus run totals), the per-department salary report, headline
//! summary statistics, and the money rounding used for presentation.

mod department_report;
mod payroll;
mod rounding;
mod summary_stats;

pub use department_report::build_department_report;
pub use payroll::{calculate_pay_line, calculate_payroll};
pub use rounding::{MONEY_DECIMAL_PLACES, format_money, round_money};
pub use summary_stats::calculate_summary_stats;
