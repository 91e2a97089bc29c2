use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{Appointment, AppointmentData, AppointmentId, AppointmentStatus};

/// REST DTO for appointment representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: AppointmentId,
    pub customer_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: AppointmentStatusDto,
    pub notes: Option<String>,
}

/// REST DTO for creating or replacing an appointment.
/// Every field is optional on the wire; the service decides what is valid.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReq {
    pub customer_name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatusDto>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatusDto {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

// Conversion implementations between REST DTOs and contract models

impl From<AppointmentStatus> for AppointmentStatusDto {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Scheduled => Self::Scheduled,
            AppointmentStatus::Confirmed => Self::Confirmed,
            AppointmentStatus::Cancelled => Self::Cancelled,
            AppointmentStatus::Completed => Self::Completed,
        }
    }
}

impl From<AppointmentStatusDto> for AppointmentStatus {
    fn from(status: AppointmentStatusDto) -> Self {
        match status {
            AppointmentStatusDto::Scheduled => Self::Scheduled,
            AppointmentStatusDto::Confirmed => Self::Confirmed,
            AppointmentStatusDto::Cancelled => Self::Cancelled,
            AppointmentStatusDto::Completed => Self::Completed,
        }
    }
}

impl From<Appointment> for AppointmentDto {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            customer_name: appointment.customer_name,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            status: appointment.status.into(),
            notes: appointment.notes,
        }
    }
}

impl From<AppointmentReq> for AppointmentData {
    fn from(req: AppointmentReq) -> Self {
        Self {
            // A missing name is left for the service to reject.
            customer_name: req.customer_name.unwrap_or_default(),
            start_time: req.start_time,
            end_time: req.end_time,
            status: req.status.map(Into::into).unwrap_or_default(),
            notes: req.notes,
        }
    }
}
