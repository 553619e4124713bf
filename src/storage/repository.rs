use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::{Employee, EmployeeDraft, EmployeeId};

use super::{EmployeeStore, MIGRATION_001_INITIAL};

/// Repository for persisting and querying employees in SQLite.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Safe to run against an initialized database.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    fn row_to_employee(row: &sqlx::sqlite::SqliteRow) -> Employee {
        Employee {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            department: row.get("department"),
        }
    }
}

#[async_trait]
impl EmployeeStore for Repository {
    async fn find_all(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, department
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list employees")?;

        Ok(rows.iter().map(Self::row_to_employee).collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, department
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch employee")?;

        Ok(row.as_ref().map(Self::row_to_employee))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, department
            FROM employees
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch employee by email")?;

        Ok(row.as_ref().map(Self::row_to_employee))
    }

    async fn insert(&self, draft: EmployeeDraft) -> Result<Employee> {
        let row = sqlx::query(
            r#"
            INSERT INTO employees (first_name, last_name, email, department)
            VALUES (?, ?, ?, ?)
            RETURNING id, first_name, last_name, email, department
            "#,
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.email)
        .bind(&draft.department)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save employee")?;

        Ok(Self::row_to_employee(&row))
    }

    async fn save(&self, employee: Employee) -> Result<Employee> {
        let updated = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, email = ?, department = ?
            WHERE id = ?
            RETURNING id, first_name, last_name, email, department
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to save employee {}", employee.id))?;

        match updated {
            Some(row) => Ok(Self::row_to_employee(&row)),
            None => anyhow::bail!("Employee {} no longer exists", employee.id),
        }
    }

    async fn exists_by_id(&self, id: EmployeeId) -> Result<bool> {
        let present: i64 =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?) as present")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .context("Failed to check employee existence")?
                .get("present");

        Ok(present != 0)
    }

    async fn delete_by_id(&self, id: EmployeeId) -> Result<()> {
        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete employee")?;
        Ok(())
    }
}
