mod memory;
mod repository;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Employee, EmployeeDraft, EmployeeId};

pub use memory::*;
pub use repository::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Persistence operations the employee service relies on.
///
/// Failures are opaque: the service never inspects them, it only
/// forwards them to its caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees in insertion order.
    async fn find_all(&self) -> Result<Vec<Employee>>;

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>>;

    /// Store a new employee and return it with a freshly assigned id.
    async fn insert(&self, draft: EmployeeDraft) -> Result<Employee>;

    /// Overwrite the stored row with the same id. Fails if that row no
    /// longer exists; a deleted employee is never written back.
    async fn save(&self, employee: Employee) -> Result<Employee>;

    async fn exists_by_id(&self, id: EmployeeId) -> Result<bool>;

    /// Remove an employee. Removing a missing id is a no-op.
    async fn delete_by_id(&self, id: EmployeeId) -> Result<()>;
}
