//! Maps service failures and rejected requests onto HTTP responses

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::AppError;

/// JSON body of every error the API itself reports: service failures and
/// requests whose path id or JSON payload could not be extracted.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Error type returned by the handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmployeeAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmployeeNotFound(_) => "employee_not_found",
            AppError::EmployeeAlreadyExists(_) => "employee_already_exists",
            AppError::Database(_) => "database_error",
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let message = match &err {
            AppError::Database(e) => {
                // Storage details stay in the logs.
                error!(target: "database", error = %format!("{e:#}"), "Database error occurred");
                "Database error".to_string()
            }
            other => other.to_string(),
        };

        Self {
            status: err.status_code(),
            code: err.code(),
            message,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            code: "invalid_request",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            code: "invalid_request",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            code: self.code.to_string(),
            message: self.message,
        });

        (self.status, body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
