use async_trait::async_trait;

use crate::contract::model::{Appointment, AppointmentData, AppointmentId};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    /// All appointments in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<Appointment>>;
    /// Load an appointment by id.
    async fn find_by_id(&self, id: AppointmentId) -> anyhow::Result<Option<Appointment>>;
    /// Exact match on customer name; collation is the store's business.
    async fn find_by_customer_name(&self, customer_name: &str)
        -> anyhow::Result<Vec<Appointment>>;
    /// Persist a new appointment. The store assigns the id and never reuses one.
    async fn insert(&self, data: AppointmentData) -> anyhow::Result<Appointment>;
    /// Overwrite all mutable fields. `None` if no appointment has this id.
    async fn replace(
        &self,
        id: AppointmentId,
        data: AppointmentData,
    ) -> anyhow::Result<Option<Appointment>>;
    /// Delete by id. Returns true if a row was deleted.
    async fn remove(&self, id: AppointmentId) -> anyhow::Result<bool>;
}
