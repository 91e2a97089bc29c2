use crate::contract::model::Appointment;

/// Output port: announce that an appointment changed (no knowledge of transport).
///
/// Fire-and-forget: implementations must not block the caller and must
/// swallow (and log) their own delivery failures.
pub trait AppointmentNotifier: Send + Sync + 'static {
    fn emit(&self, appointment: &Appointment);
}
