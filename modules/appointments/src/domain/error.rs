use thiserror::Error;

use crate::contract::model::AppointmentId;
use crate::domain::access::OperationKind;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Access denied: {operation} requires role {required}")]
    Forbidden {
        operation: OperationKind,
        required: &'static str,
    },

    #[error("Appointment not found: {id}")]
    AppointmentNotFound { id: AppointmentId },

    #[error("Customer name is required")]
    EmptyCustomerName,

    #[error("Customer name too long: {len} characters (max: {max})")]
    CustomerNameTooLong { len: usize, max: usize },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn forbidden(operation: OperationKind, required: &'static str) -> Self {
        Self::Forbidden {
            operation,
            required,
        }
    }

    pub fn appointment_not_found(id: AppointmentId) -> Self {
        Self::AppointmentNotFound { id }
    }

    pub fn empty_customer_name() -> Self {
        Self::EmptyCustomerName
    }

    pub fn customer_name_too_long(len: usize, max: usize) -> Self {
        Self::CustomerNameTooLong { len, max }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
