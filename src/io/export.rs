use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::EmployeeService;
use crate::domain::Employee;

/// Directory snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub employees: Vec<Employee>,
}

/// Exporter for converting the directory to various formats
pub struct Exporter<'a> {
    service: &'a EmployeeService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a EmployeeService) -> Self {
        Self { service }
    }

    /// Export employees to CSV format
    pub async fn export_employees_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let employees = self.service.list_employees().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "first_name", "last_name", "email", "department"])?;

        for employee in &employees {
            csv_writer.write_record([
                employee.id.to_string().as_str(),
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.email.as_str(),
                employee.department.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(employees.len())
    }

    /// Export the whole directory as a JSON snapshot
    pub async fn export_json<W: Write>(&self, mut writer: W) -> Result<DirectorySnapshot> {
        let employees = self.service.list_employees().await?;

        let snapshot = DirectorySnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            employees,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
