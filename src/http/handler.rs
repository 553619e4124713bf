//! Employee API handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use super::error::ApiError;
use crate::application::EmployeeService;
use crate::domain::{Employee, EmployeeDraft, EmployeeId};

type ApiResult<T> = Result<T, ApiError>;

/// List all employees
pub async fn list(State(service): State<EmployeeService>) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(service.list_employees().await?))
}

/// Get employee by id
pub async fn get_by_id(
    State(service): State<EmployeeService>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<Json<Employee>> {
    let Path(id) = id?;
    Ok(Json(service.get_employee(id).await?))
}

/// Create a new employee
pub async fn create(
    State(service): State<EmployeeService>,
    payload: Result<Json<EmployeeDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let Json(payload) = payload?;
    let employee = service.create_employee(payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Replace an employee's fields
pub async fn update(
    State(service): State<EmployeeService>,
    id: Result<Path<EmployeeId>, PathRejection>,
    payload: Result<Json<EmployeeDraft>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(service.update_employee(payload, id).await?))
}

/// Delete an employee
pub async fn delete(
    State(service): State<EmployeeService>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    service.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
