pub mod notifier;

pub use notifier::AppointmentNotifier;
