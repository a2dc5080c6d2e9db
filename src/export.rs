//! CSV export of a payroll run.
//!
//! The export is written to a fixed path, replacing any earlier file. After
//! writing, the file is checked to exist and be non-empty; a missing or empty
//! file is reported separately from an I/O failure.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{calculate_payroll, format_money};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayrollLine};

/// Header row of the export file.
pub const EXPORT_HEADER: [&str; 7] = [
    "ID",
    "Name",
    "Department",
    "Gross Pay",
    "Tax Amount",
    "Allowances",
    "Net Pay",
];

const LINE_TERMINATOR: &str = "\r\n";

/// Details of a completed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Where the file was written.
    pub path: PathBuf,
    /// Number of employee rows, excluding the header.
    pub rows: usize,
    /// Size of the written file.
    pub bytes: u64,
    /// When the export finished.
    pub exported_at: DateTime<Utc>,
}

/// Writes payroll exports to a fixed destination.
#[derive(Debug, Clone)]
pub struct PayrollExporter {
    path: PathBuf,
}

impl PayrollExporter {
    /// Creates an exporter writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The export destination.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Computes payroll for `employees` and writes it, in order, as CSV.
    ///
    /// # Errors
    ///
    /// `CalculationOverflow` when a payroll figure overflows (nothing is
    /// written), `ExportFailed` when creating the directory or writing the
    /// file fails,
    /// `ExportVerificationFailed` when the write reported success but the
    /// file is missing or empty afterwards.
    pub fn export(&self, employees: &[Employee]) -> PayrollResult<ExportReport> {
        let run = calculate_payroll(employees)?;
        let contents = render_csv(&run.lines);

        self.write(&contents)
            .map_err(|source| PayrollError::ExportFailed {
                path: self.path.clone(),
                source,
            })?;

        let bytes = self.verify()?;
        info!(
            path = %self.path.display(),
            rows = run.lines.len(),
            bytes,
            "Payroll export written"
        );

        Ok(ExportReport {
            path: self.path.clone(),
            rows: run.lines.len(),
            bytes,
            exported_at: Utc::now(),
        })
    }

    /// Reads back the most recent export.
    pub fn read(&self) -> PayrollResult<String> {
        fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PayrollError::ExportNotFound {
                    path: self.path.clone(),
                }
            } else {
                PayrollError::ExportFailed {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }

    fn write(&self, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }

    fn verify(&self) -> PayrollResult<u64> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(meta.len()),
            _ => {
                warn!(path = %self.path.display(), "Export file missing or empty after write");
                Err(PayrollError::ExportVerificationFailed {
                    path: self.path.clone(),
                })
            }
        }
    }
}

/// Renders payroll lines as CSV text, header first.
///
/// Money columns carry exactly two decimals; a missing department is an
/// empty field.
pub fn render_csv(lines: &[PayrollLine]) -> String {
    let mut out = String::new();
    push_record(&mut out, EXPORT_HEADER.iter().copied());

    for line in lines {
        let id = line.employee_id.to_string();
        let gross = format_money(line.gross_pay);
        let tax = format_money(line.tax_amount);
        let allowances = format_money(line.allowances);
        let net = format_money(line.net_pay);
        push_record(
            &mut out,
            [
                id.as_str(),
                line.name.as_str(),
                line.department.as_deref().unwrap_or(""),
                gross.as_str(),
                tax.as_str(),
                allowances.as_str(),
                net.as_str(),
            ],
        );
    }
    out
}

fn push_record<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str(LINE_TERMINATOR);
}

/// Quotes a field only when it holds a delimiter, quote or line break.
fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
