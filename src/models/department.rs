//! Department registry records.

use serde::{Deserialize, Serialize};

/// A registered department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Unique department name.
    pub name: String,
}

/// A department together with the number of employees referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentHeadcount {
    /// The department.
    #[serde(flatten)]
    pub department: Department,
    /// Employees whose `department` field equals the department name.
    pub employee_count: u64,
}

/// Outcome of a guarded department delete.
///
/// A department is either unreferenced, in which case it is deleted, or
/// referenced by at least one employee, in which case it stays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentDeletion {
    /// The department was removed.
    Deleted(Department),
    /// Employees still reference the department; nothing was removed.
    InUse {
        /// The department that was kept.
        department: Department,
        /// How many employees reference it.
        employee_count: u64,
    },
    /// No department has the requested id.
    NotFound,
}
