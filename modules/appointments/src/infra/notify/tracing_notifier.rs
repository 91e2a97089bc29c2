use tracing::info;

use crate::contract::model::Appointment;
use crate::domain::ports::AppointmentNotifier;

/// Notifier used when no notifications endpoint is configured: the event
/// only shows up in the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl AppointmentNotifier for TracingNotifier {
    fn emit(&self, appointment: &Appointment) {
        info!(
            appointment_id = appointment.id,
            customer_name = %appointment.customer_name,
            status = appointment.status.as_str(),
            "Appointment updated"
        );
    }
}
