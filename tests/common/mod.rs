// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use staffbook::application::EmployeeService;
use staffbook::domain::{Employee, EmployeeDraft};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(EmployeeService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = EmployeeService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to build a draft with placeholder names
pub fn draft(email: &str) -> EmployeeDraft {
    EmployeeDraft::new("TestF", "TestL", email, "Customer Service")
}

/// Test fixture: Standard staff setup
pub struct StandardStaff;

impl StandardStaff {
    /// Create five employees across three departments
    pub async fn create(service: &EmployeeService) -> Result<Vec<Employee>> {
        let drafts = [
            EmployeeDraft::new("Ada", "Lovelace", "ada@example.com", "Engineering"),
            EmployeeDraft::new("Grace", "Hopper", "grace@example.com", "Engineering"),
            EmployeeDraft::new("Alan", "Turing", "alan@example.com", "Research"),
            EmployeeDraft::new("Katherine", "Johnson", "katherine@example.com", "Research"),
            EmployeeDraft::new("Edsger", "Dijkstra", "edsger@example.com", "Operations"),
        ];

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(service.create_employee(draft).await?);
        }
        Ok(created)
    }
}
