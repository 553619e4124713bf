use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Employee, EmployeeDraft, EmployeeId};

use super::EmployeeStore;

/// In-process store backed by an ordered map.
///
/// Ids start at 1 and are never reused. Unlike the SQLite schema there is
/// no unique constraint on email here.
#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: EmployeeId,
    employees: BTreeMap<EmployeeId, Employee>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for MemoryRepository {
    async fn find_all(&self) -> Result<Vec<Employee>> {
        Ok(self.state.read().await.employees.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>> {
        Ok(self.state.read().await.employees.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let state = self.state.read().await;
        Ok(state
            .employees
            .values()
            .find(|employee| employee.email == email)
            .cloned())
    }

    async fn insert(&self, draft: EmployeeDraft) -> Result<Employee> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let employee = draft.with_id(state.last_id);
        state.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn save(&self, employee: Employee) -> Result<Employee> {
        let mut state = self.state.write().await;
        match state.employees.get_mut(&employee.id) {
            Some(stored) => {
                *stored = employee.clone();
                Ok(employee)
            }
            None => anyhow::bail!("Employee {} no longer exists", employee.id),
        }
    }

    async fn exists_by_id(&self, id: EmployeeId) -> Result<bool> {
        Ok(self.state.read().await.employees.contains_key(&id))
    }

    async fn delete_by_id(&self, id: EmployeeId) -> Result<()> {
        self.state.write().await.employees.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(email: &str) -> EmployeeDraft {
        EmployeeDraft::new("First", "Last", email, "Dept")
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = MemoryRepository::new();

        let a = repo.insert(draft("a@x.com")).await.unwrap();
        let b = repo.insert(draft("b@x.com")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = MemoryRepository::new();

        let a = repo.insert(draft("a@x.com")).await.unwrap();
        repo.delete_by_id(a.id).await.unwrap();
        let b = repo.insert(draft("b@x.com")).await.unwrap();

        assert_eq!(b.id, 2);
        assert!(!repo.find_all().await.unwrap().is_empty());
        assert!(!repo.exists_by_id(a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let repo = MemoryRepository::new();
        for email in ["c@x.com", "a@x.com", "b@x.com"] {
            repo.insert(draft(email)).await.unwrap();
        }

        let emails: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.email)
            .collect();
        assert_eq!(emails, vec!["c@x.com", "a@x.com", "b@x.com"]);
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_sensitive() {
        let repo = MemoryRepository::new();
        repo.insert(draft("a@x.com")).await.unwrap();

        assert!(repo.find_by_email("a@x.com").await.unwrap().is_some());
        assert!(repo.find_by_email("A@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_row() {
        let repo = MemoryRepository::new();
        let mut employee = repo.insert(draft("a@x.com")).await.unwrap();
        employee.department = "Finance".into();

        repo.save(employee.clone()).await.unwrap();

        assert_eq!(repo.find_by_id(employee.id).await.unwrap(), Some(employee));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_does_not_bring_back_deleted_row() {
        let repo = MemoryRepository::new();
        let employee = repo.insert(draft("a@x.com")).await.unwrap();
        repo.delete_by_id(employee.id).await.unwrap();

        assert!(repo.save(employee.clone()).await.is_err());
        assert!(!repo.exists_by_id(employee.id).await.unwrap());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let repo = MemoryRepository::new();
        repo.delete_by_id(7).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
