//! Employee endpoint handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::employees::{NewEmployee, OperationStatus, Sourced};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Response header naming where read data came from ("upstream" or "fallback").
pub const SOURCE_HEADER: HeaderName = HeaderName::from_static("x-employee-source");

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub status: OperationStatus,
}

/// `GET /`
pub async fn list_employees(State(state): State<AppState>) -> Result<Response, ApiError> {
    let employees = state.repository.list_all().await?;
    Ok(sourced_json(employees))
}

/// `GET /search/{name}`
pub async fn search_employees(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
) -> Result<Response, ApiError> {
    let employees = state.repository.search(&fragment).await?;
    tracing::debug!(fragment = %fragment, matches = employees.value.len(), "Search completed");
    Ok(sourced_json(employees))
}

/// `GET /{id}`
pub async fn get_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let employee = state.repository.get_by_id(id).await?;
    Ok(sourced_json(employee))
}

/// `GET /highestSalary`
pub async fn highest_salary(State(state): State<AppState>) -> Result<Response, ApiError> {
    let salary = state.repository.highest_salary().await?;
    Ok(sourced_json(salary))
}

/// `GET /topTenHighestEarningEmployeeNames`
pub async fn top_ten_highest_earning(State(state): State<AppState>) -> Result<Response, ApiError> {
    let employees = state.repository.top_ten_by_salary().await?;
    Ok(sourced_json(employees))
}

/// `POST /`
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let Json(payload) = payload?;
    let employee = NewEmployee::from_payload(&payload)?;

    let status = state.repository.create(&employee).await;
    Ok((StatusCode::CREATED, Json(CreateResponse { status })))
}

/// `DELETE /{id}`, answering with the deleted employee's name as text.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<String, ApiError> {
    let id = parse_id(&raw_id)?;
    Ok(state.repository.delete(id).await?)
}

/// Ids are plain ASCII digits; signs and whitespace are rejected.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    let invalid = || ApiError::BadRequest(format!("Invalid employee id: '{}'", raw));

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

fn sourced_json<T: Serialize>(sourced: Sourced<T>) -> Response {
    (
        [(SOURCE_HEADER, HeaderValue::from_static(sourced.source.as_str()))],
        Json(sourced.value),
    )
        .into_response()
}
