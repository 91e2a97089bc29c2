use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the appointments module (`modules.appointments`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppointmentsConfig {
    #[serde(default = "default_max_customer_name_length")]
    pub max_customer_name_length: usize,
    #[serde(default = "default_max_notes_length")]
    pub max_notes_length: usize,
    /// Where update notifications are POSTed. Unset: notifications are only logged.
    #[serde(default)]
    pub notifications_base_url: Option<String>,
    #[serde(default = "default_notify_timeout_ms")]
    pub notify_timeout_ms: u64,
}

impl Default for AppointmentsConfig {
    fn default() -> Self {
        Self {
            max_customer_name_length: default_max_customer_name_length(),
            max_notes_length: default_max_notes_length(),
            notifications_base_url: None,
            notify_timeout_ms: default_notify_timeout_ms(),
        }
    }
}

impl AppointmentsConfig {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            max_customer_name_length: self.max_customer_name_length,
            max_notes_length: self.max_notes_length,
        }
    }
}

fn default_max_customer_name_length() -> usize {
    255
}

fn default_max_notes_length() -> usize {
    2000
}

fn default_notify_timeout_ms() -> u64 {
    5000
}
