use axum::http::StatusCode;
use modkit::{Problem, ProblemResponse};
use tracing::error;

use crate::domain::error::DomainError;

fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: String,
    instance: &str,
) -> ProblemResponse {
    Problem::new(status, title, detail)
        .with_type(format!("https://errors.example.com/{code}"))
        .with_code(code)
        .with_instance(instance)
        .with_current_span()
        .into()
}

/// Map a domain error onto an RFC 9457 problem response.
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::Forbidden { .. } => from_parts(
            StatusCode::FORBIDDEN,
            "APPOINTMENTS_FORBIDDEN",
            "Forbidden",
            e.to_string(),
            instance,
        ),
        DomainError::AppointmentNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "APPOINTMENTS_NOT_FOUND",
            "Appointment not found",
            e.to_string(),
            instance,
        ),
        DomainError::EmptyCustomerName
        | DomainError::CustomerNameTooLong { .. }
        | DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "APPOINTMENTS_VALIDATION",
            "Bad Request",
            e.to_string(),
            instance,
        ),
        DomainError::Database { .. } => {
            // Details stay in the logs.
            error!(error = %e, "Database error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal Server Error",
                "An internal database error occurred".to_string(),
                instance,
            )
        }
    }
}

/// Problem for a request body that could not be decoded.
pub fn invalid_body(detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "APPOINTMENTS_INVALID_BODY",
        "Bad Request",
        detail.into(),
        instance,
    )
}

/// Problem for a URL path segment that could not be parsed.
pub fn invalid_path(detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "APPOINTMENTS_INVALID_PATH",
        "Bad Request",
        detail.into(),
        instance,
    )
}
