use thiserror::Error;

use crate::domain::EmployeeId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No employee found with id: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("{0} already exist!")]
    EmployeeAlreadyExists(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
