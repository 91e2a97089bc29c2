//! Adapters for the [`AppointmentNotifier`](crate::domain::ports::AppointmentNotifier) port.

pub mod http_notifier;
pub mod tracing_notifier;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{Appointment, AppointmentId};

pub use http_notifier::HttpAppointmentNotifier;
pub use tracing_notifier::TracingNotifier;

/// Wire payload announcing an appointment change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdatedEvent {
    pub kind: String,
    pub id: AppointmentId,
    pub customer_name: String,
    pub status: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub at: DateTime<Utc>,
}

impl AppointmentUpdatedEvent {
    pub fn from_appointment(appointment: &Appointment, at: DateTime<Utc>) -> Self {
        Self {
            kind: "updated".to_string(),
            id: appointment.id,
            customer_name: appointment.customer_name.clone(),
            status: appointment.status.as_str().to_string(),
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            at,
        }
    }
}
