//! SQLite-backed store for employees and departments.
//!
//! Money and rate columns are stored as decimal text so values round-trip
//! exactly. A single connection sits behind a mutex; every operation holds
//! it for its duration, and multi-statement operations run in a transaction.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior, params};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    Department, DepartmentDeletion, DepartmentHeadcount, Employee, EmployeeDraft,
};

use super::{DepartmentRegistry, EmployeeRepository};

const SCHEMA: &str = "\
    CREATE TABLE IF NOT EXISTS employees (\
        id INTEGER PRIMARY KEY AUTOINCREMENT,\
        name TEXT NOT NULL,\
        position TEXT NOT NULL,\
        department TEXT,\
        salary TEXT NOT NULL,\
        tax_rate TEXT NOT NULL DEFAULT '0.15',\
        allowances TEXT NOT NULL DEFAULT '0'\
    );\
    CREATE TABLE IF NOT EXISTS departments (\
        id INTEGER PRIMARY KEY AUTOINCREMENT,\
        name TEXT UNIQUE NOT NULL\
    );\
    CREATE INDEX IF NOT EXISTS idx_employees_department ON employees(department);";

const EMPLOYEE_COLUMNS: &str = "id, name, position, department, salary, tax_rate, allowances";

/// Employee and department store over a single SQLite connection.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    ///
    /// The containing directory is created if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> PayrollResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PayrollError::Internal {
                message: format!("cannot create {}: {e}", parent.display()),
            })?;
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        info!(path = %path.display(), "Opened payroll database");
        Self::with_connection(conn, Some(path))
    }

    /// Opens a private in-memory database, used by tests and benchmarks.
    pub fn open_in_memory() -> PayrollResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> PayrollResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// The database file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Inserts `names` into the registry if, and only if, it is empty.
    ///
    /// Returns how many departments were inserted.
    pub fn seed_departments<S: AsRef<str>>(&self, names: &[S]) -> PayrollResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM departments", [], |r| r.get(0))?;
        if existing > 0 {
            debug!(existing, "Department registry already populated, skipping seed");
            return Ok(0);
        }

        let mut inserted = 0;
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            inserted += tx.execute(
                "INSERT OR IGNORE INTO departments (name) VALUES (?1)",
                params![name],
            )?;
        }
        tx.commit()?;

        info!(inserted, "Seeded department registry");
        Ok(inserted)
    }

    fn lock(&self) -> PayrollResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| PayrollError::Internal {
            message: "database connection lock poisoned".to_string(),
        })
    }
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(text.trim())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        position: row.get(2)?,
        department: row.get(3)?,
        salary: decimal_column(row, 4)?,
        tax_rate: decimal_column(row, 5)?,
        allowances: decimal_column(row, 6)?,
    })
}

/// Rejects drafts naming a department the registry does not hold.
fn ensure_department_registered(tx: &Transaction<'_>, draft: &EmployeeDraft) -> PayrollResult<()> {
    let Some(name) = draft.department.as_deref() else {
        return Ok(());
    };

    let registered = tx
        .query_row(
            "SELECT 1 FROM departments WHERE name = ?1",
            params![name],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if registered {
        Ok(())
    } else {
        Err(PayrollError::UnknownDepartment {
            name: name.to_string(),
        })
    }
}

impl EmployeeRepository for SqliteStore {
    fn list_employees(&self) -> PayrollResult<Vec<Employee>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id"
        ))?;
        let employees = stmt
            .query_map([], employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    fn get_employee(&self, id: i64) -> PayrollResult<Option<Employee>> {
        let conn = self.lock()?;
        let employee = conn
            .query_row(
                &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
                params![id],
                employee_from_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn create_employee(&self, draft: &EmployeeDraft) -> PayrollResult<Employee> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_department_registered(&tx, draft)?;

        tx.execute(
            "INSERT INTO employees (name, position, department, salary, tax_rate, allowances) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.name,
                draft.position,
                draft.department,
                draft.salary.to_string(),
                draft.tax_rate.to_string(),
                draft.allowances.to_string(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!(employee_id = id, "Inserted employee");
        Ok(draft.clone().into_employee(id))
    }

    fn update_employee(&self, id: i64, draft: &EmployeeDraft) -> PayrollResult<Option<Employee>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_department_registered(&tx, draft)?;

        let updated = tx.execute(
            "UPDATE employees SET name = ?1, position = ?2, department = ?3, salary = ?4, \
             tax_rate = ?5, allowances = ?6 WHERE id = ?7",
            params![
                draft.name,
                draft.position,
                draft.department,
                draft.salary.to_string(),
                draft.tax_rate.to_string(),
                draft.allowances.to_string(),
                id,
            ],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        tx.commit()?;

        debug!(employee_id = id, "Updated employee");
        Ok(Some(draft.clone().into_employee(id)))
    }

    fn delete_employee(&self, id: i64) -> PayrollResult<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

impl DepartmentRegistry for SqliteStore {
    fn list_departments(&self) -> PayrollResult<Vec<Department>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM departments ORDER BY id")?;
        let departments = stmt
            .query_map([], |row| {
                Ok(Department {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    fn department_headcounts(&self) -> PayrollResult<Vec<DepartmentHeadcount>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT d.id, d.name, \
                    (SELECT COUNT(*) FROM employees e WHERE e.department = d.name) \
             FROM departments d ORDER BY d.id",
        )?;
        let headcounts = stmt
            .query_map([], |row| {
                let count: i64 = row.get(2)?;
                Ok(DepartmentHeadcount {
                    department: Department {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    },
                    employee_count: count as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(headcounts)
    }

    fn create_department(&self, name: &str) -> PayrollResult<Department> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PayrollError::InvalidDepartment {
                message: "name must not be empty".to_string(),
            });
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let exists = tx
            .query_row(
                "SELECT 1 FROM departments WHERE name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if exists {
            return Err(PayrollError::DuplicateDepartment {
                name: name.to_string(),
            });
        }

        tx.execute("INSERT INTO departments (name) VALUES (?1)", params![name])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Department {
            id,
            name: name.to_string(),
        })
    }

    fn delete_department(&self, id: i64) -> PayrollResult<DepartmentDeletion> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let name: Option<String> = tx
            .query_row(
                "SELECT name FROM departments WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(name) = name else {
            return Ok(DepartmentDeletion::NotFound);
        };
        let department = Department { id, name };

        let referencing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM employees WHERE department = ?1",
            params![department.name],
            |row| row.get(0),
        )?;
        if referencing > 0 {
            return Ok(DepartmentDeletion::InUse {
                department,
                employee_count: referencing as u64,
            });
        }

        tx.execute("DELETE FROM departments WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(DepartmentDeletion::Deleted(department))
    }
}
