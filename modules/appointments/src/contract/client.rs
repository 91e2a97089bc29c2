use async_trait::async_trait;
use modkit::SecurityCtx;

use crate::contract::{
    error::AppointmentsError,
    model::{Appointment, AppointmentData, AppointmentId},
};

/// Public API trait for the appointments module that other modules can use.
/// Every call carries the caller's identity; access rules are enforced behind it.
#[async_trait]
pub trait AppointmentsApi: Send + Sync {
    /// List every appointment (ADMIN only)
    async fn list_appointments(
        &self,
        ctx: &SecurityCtx,
    ) -> Result<Vec<Appointment>, AppointmentsError>;

    /// Get an appointment by ID
    async fn get_appointment(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
    ) -> Result<Appointment, AppointmentsError>;

    /// All appointments booked under exactly this customer name
    async fn find_by_customer_name(
        &self,
        ctx: &SecurityCtx,
        customer_name: &str,
    ) -> Result<Vec<Appointment>, AppointmentsError>;

    /// Create a new appointment
    async fn create_appointment(
        &self,
        ctx: &SecurityCtx,
        data: AppointmentData,
    ) -> Result<Appointment, AppointmentsError>;

    /// Replace an appointment's fields (ADMIN only), optionally emitting a change notification
    async fn update_appointment(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
        data: AppointmentData,
        push_event: bool,
    ) -> Result<Appointment, AppointmentsError>;

    /// Delete an appointment by ID (ADMIN only)
    async fn delete_appointment(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
    ) -> Result<(), AppointmentsError>;
}
