use chrono::{DateTime, Utc};

pub type AppointmentId = i64;

/// Lifecycle marker carried along with an appointment. The service never
/// interprets it; it is stored and returned as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" => Some(Self::Scheduled),
            "CONFIRMED" => Some(Self::Confirmed),
            "CANCELLED" => Some(Self::Cancelled),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Pure appointment model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub customer_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// Every mutable field of an appointment. Used for both create and full
/// replacement on update; the id is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentData {
    pub customer_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl AppointmentData {
    pub fn for_customer(name: impl Into<String>) -> Self {
        Self {
            customer_name: name.into(),
            ..Default::default()
        }
    }
}
