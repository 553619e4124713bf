use anyhow::Result;
use serde::Deserialize;
use std::io::Read;

use crate::application::{AppError, EmployeeService};
use crate::domain::EmployeeDraft;

use super::DirectorySnapshot;

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
    pub skip_duplicates: bool,
}

/// One CSV row. Columns are matched by header, so an exported file
/// (which carries an `id` column) can be imported as-is.
#[derive(Debug, Deserialize)]
struct EmployeeRow {
    #[serde(alias = "firstName")]
    first_name: String,
    #[serde(alias = "lastName")]
    last_name: String,
    email: String,
    department: String,
}

impl From<EmployeeRow> for EmployeeDraft {
    fn from(row: EmployeeRow) -> Self {
        EmployeeDraft::new(row.first_name, row.last_name, row.email, row.department)
    }
}

/// Importer for bulk-loading employees through the service rules
pub struct Importer<'a> {
    service: &'a EmployeeService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a EmployeeService) -> Self {
        Self { service }
    }

    /// Import employees from CSV. Every row goes through `create_employee`,
    /// so duplicate emails are rejected exactly as over the API.
    pub async fn import_employees_csv<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut result = ImportResult::default();

        for (line_num, row) in csv_reader.deserialize::<EmployeeRow>().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let draft: EmployeeDraft = match row {
                Ok(row) => row.into(),
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            self.create(line, draft, &options, &mut result).await;
        }

        Ok(result)
    }

    /// Import a JSON snapshot written by `Exporter::export_json`. Stored ids
    /// are not carried over; each employee gets a fresh one. Errors are
    /// reported against the employee's 1-based position in the snapshot.
    pub async fn import_json<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let snapshot: DirectorySnapshot = serde_json::from_reader(reader)?;
        let mut result = ImportResult::default();

        for (index, employee) in snapshot.employees.into_iter().enumerate() {
            self.create(index + 1, employee.into(), &options, &mut result)
                .await;
        }

        Ok(result)
    }

    async fn create(
        &self,
        line: usize,
        draft: EmployeeDraft,
        options: &ImportOptions,
        result: &mut ImportResult,
    ) {
        if options.dry_run {
            result.imported += 1;
            return;
        }

        match self.service.create_employee(draft).await {
            Ok(_) => result.imported += 1,
            Err(AppError::EmployeeAlreadyExists(_)) if options.skip_duplicates => {
                result.skipped += 1;
            }
            Err(e) => result.errors.push(ImportError {
                line,
                error: e.to_string(),
            }),
        }
    }
}
