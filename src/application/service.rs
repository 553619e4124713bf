use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Employee, EmployeeDraft, EmployeeId};
use crate::storage::{EmployeeStore, MemoryRepository, Repository};

use super::AppError;

/// Application service enforcing the employee directory's business rules.
/// This is the primary interface for any client (HTTP API, CLI, importers).
///
/// The service holds no state of its own; every rule is checked against the
/// injected store, and store failures are returned as [`AppError::Database`].
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    /// Create a new employee service over the given store.
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Service backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRepository::new()))
    }

    /// Open (creating if needed) the database at the given path and bootstrap its schema.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(Arc::new(repo)))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(Arc::new(repo)))
    }

    /// List all employees in creation order.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        let employees = self.store.find_all().await?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    /// Get an employee by id.
    pub async fn get_employee(&self, id: EmployeeId) -> Result<Employee, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::EmployeeNotFound(id))
    }

    /// Create a new employee. The email must not belong to anyone yet.
    pub async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, AppError> {
        if self.store.find_by_email(&draft.email).await?.is_some() {
            warn!(email = %draft.email, "Rejected employee with duplicate email");
            return Err(AppError::EmployeeAlreadyExists(draft.email));
        }

        let employee = self.store.insert(draft).await?;
        info!(employee_id = employee.id, email = %employee.email, "Created employee");
        Ok(employee)
    }

    /// Replace every mutable field of an existing employee.
    ///
    /// Unlike [`create_employee`](Self::create_employee), the new email is not
    /// checked against other employees; a store with a unique constraint will
    /// reject a collision as a database error.
    pub async fn update_employee(
        &self,
        draft: EmployeeDraft,
        id: EmployeeId,
    ) -> Result<Employee, AppError> {
        let mut employee = self.get_employee(id).await?;
        employee.apply(draft);

        let employee = self.store.save(employee).await?;
        info!(employee_id = employee.id, "Updated employee");
        Ok(employee)
    }

    /// Permanently remove an employee.
    pub async fn delete_employee(&self, id: EmployeeId) -> Result<(), AppError> {
        if !self.store.exists_by_id(id).await? {
            return Err(AppError::EmployeeNotFound(id));
        }

        self.store.delete_by_id(id).await?;
        info!(employee_id = id, "Deleted employee");
        Ok(())
    }
}
