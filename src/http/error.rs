//! Mapping of failures to HTTP error responses.
//!
//! Every error leaves the gateway as
//! `{timestamp, status, message, details: [detail]}`, where `status` is the
//! upper-snake name of the HTTP status.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::employees::{EmployeeError, InputError};

/// Error returned from HTTP handlers. The payload is the detail line.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400: employee absent.
    #[error("{0}")]
    NotFound(String),

    /// 400: upstream did not confirm a delete.
    #[error("{0}")]
    DeleteFailed(String),

    /// 404: no employees to aggregate over.
    #[error("{0}")]
    NoEmployees(String),

    /// 400: malformed path parameter or request body.
    #[error("{0}")]
    BadRequest(String),

    /// 500: upstream failure that no fallback covered.
    #[error("{0}")]
    Upstream(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: NaiveDateTime,
    pub status: String,
    pub message: String,
    pub details: Vec<String>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::DeleteFailed(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NoEmployees(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "Resource not found",
            ApiError::DeleteFailed(_) => "Delete failed",
            ApiError::NoEmployees(_) => "No employees found",
            ApiError::BadRequest(_) => "Invalid request",
            ApiError::Upstream(_) => "IO Exception.",
        }
    }

    fn body(&self) -> ErrorBody {
        ErrorBody {
            timestamp: chrono::Local::now().naive_local(),
            status: status_name(self.status_code()),
            message: self.message().to_string(),
            details: vec![self.to_string()],
        }
    }
}

/// "Bad Request" → "BAD_REQUEST"
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_ascii_uppercase()
        .replace(' ', "_")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<EmployeeError> for ApiError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::NotFound(_) => ApiError::NotFound(err.to_string()),
            EmployeeError::DeleteFailed(_) => ApiError::DeleteFailed(err.to_string()),
            EmployeeError::NoEmployees => ApiError::NoEmployees(err.to_string()),
            EmployeeError::Upstream(e) => {
                tracing::error!(error = ?e, "Upstream failure reached the API boundary");
                ApiError::Upstream(e.to_string())
            }
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
