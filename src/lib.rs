//! Payroll ledger for a small organisation.
//!
//! This crate keeps employee and department records in a SQLite database,
//! computes per-employee and aggregate payroll with exact decimal arithmetic,
//! produces department reports and summary statistics, and exports payroll
//! to a CSV file. Everything is served over a JSON HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
