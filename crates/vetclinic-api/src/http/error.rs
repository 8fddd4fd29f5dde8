//! Application error type mapping to HTTP status codes and envelope format.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use vetclinic_types::outcome::{ErrorKind, ServiceError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A workflow service reported a failure.
    Service(ServiceError),
    /// The request could not be parsed (bad JSON, bad id, bad query).
    BadRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Service(e) => StatusCode::from_u16(e.kind().http_status())
                .unwrap_or(StatusCode::BAD_REQUEST),
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Service(e) => e.kind().code(),
            AppError::BadRequest(_) => ErrorKind::ValidationError.code(),
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Service(e) => e.message(),
            AppError::BadRequest(msg) => msg,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        AppError::Service(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiResponse::error(self.code(), self.message(), String::new(), 0);
        (status, body).into_response()
    }
}
