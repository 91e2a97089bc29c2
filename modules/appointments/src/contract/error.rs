use thiserror::Error;

use crate::contract::model::AppointmentId;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppointmentsError {
    #[error("Access denied: {operation} requires role {required}")]
    Forbidden {
        operation: String,
        required: String,
    },

    #[error("Appointment not found: {id}")]
    NotFound { id: AppointmentId },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl AppointmentsError {
    pub fn forbidden(operation: impl Into<String>, required: impl Into<String>) -> Self {
        Self::Forbidden {
            operation: operation.into(),
            required: required.into(),
        }
    }

    pub fn not_found(id: AppointmentId) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for AppointmentsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            Forbidden {
                operation,
                required,
            } => Self::forbidden(operation.as_str(), required),
            AppointmentNotFound { id } => Self::not_found(id),
            EmptyCustomerName => Self::validation("Customer name is required"),
            CustomerNameTooLong { len, max } => Self::validation(format!(
                "Customer name too long: {len} characters (max: {max})"
            )),
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            Database { .. } => Self::internal(),
        }
    }
}
