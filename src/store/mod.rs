//! Persistence for employees and departments.
//!
//! Handlers depend on the [`EmployeeRepository`] and [`DepartmentRegistry`]
//! traits rather than a concrete connection; [`SqliteStore`] implements both.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::PayrollResult;
use crate::models::{Department, DepartmentDeletion, DepartmentHeadcount, Employee, EmployeeDraft};

/// Employee records keyed by id.
///
/// Operations addressing an id that does not exist report it through their
/// return value (`None` / `false`) instead of failing.
pub trait EmployeeRepository: Send + Sync {
    /// Returns every employee in id order.
    fn list_employees(&self) -> PayrollResult<Vec<Employee>>;

    /// Returns the employee with `id`, if any.
    fn get_employee(&self, id: i64) -> PayrollResult<Option<Employee>>;

    /// Inserts a new employee and returns it with its assigned id.
    ///
    /// Fails with `UnknownDepartment` if the draft names a department that is
    /// not registered.
    fn create_employee(&self, draft: &EmployeeDraft) -> PayrollResult<Employee>;

    /// Replaces every field of the employee with `id`.
    ///
    /// Returns `None` if no such employee exists.
    fn update_employee(&self, id: i64, draft: &EmployeeDraft) -> PayrollResult<Option<Employee>>;

    /// Deletes the employee with `id`, returning whether one was removed.
    fn delete_employee(&self, id: i64) -> PayrollResult<bool>;
}

/// The set of valid department names.
pub trait DepartmentRegistry: Send + Sync {
    /// Returns departments in insertion order.
    fn list_departments(&self) -> PayrollResult<Vec<Department>>;

    /// Returns departments in insertion order with their employee counts.
    fn department_headcounts(&self) -> PayrollResult<Vec<DepartmentHeadcount>>;

    /// Registers a department. Fails with `DuplicateDepartment` if the name
    /// is taken.
    fn create_department(&self, name: &str) -> PayrollResult<Department>;

    /// Deletes a department unless an employee still references it.
    ///
    /// The reference check and the delete happen atomically.
    fn delete_department(&self, id: i64) -> PayrollResult<DepartmentDeletion>;
}

/// A store offering both employees and departments.
pub trait PayrollStore: EmployeeRepository + DepartmentRegistry {}

impl<T: EmployeeRepository + DepartmentRegistry> PayrollStore for T {}
