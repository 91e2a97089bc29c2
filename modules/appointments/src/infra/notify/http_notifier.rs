use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use tracing::{instrument, warn};
use url::Url;

use crate::contract::model::Appointment;
use crate::domain::ports::AppointmentNotifier;
use crate::infra::notify::AppointmentUpdatedEvent;

/// HTTP adapter implementing the notifier port.
/// POSTs `AppointmentUpdatedEvent` JSON to `{base}/api/appointment-updated`.
#[derive(Clone)]
pub struct HttpAppointmentNotifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpAppointmentNotifier {
    pub fn new(base: &Url, timeout: Duration) -> anyhow::Result<Self> {
        let mut endpoint = base.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| anyhow!("invalid notifications base URL: {base}"))?
            .pop_if_empty()
            .extend(&["api", "appointment-updated"]);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build notifications HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Deliver one event and wait for the answer.
    #[instrument(
        name = "appointments.http.notifications.appointment_updated",
        skip_all,
        fields(endpoint = %self.endpoint, appointment_id = event.id)
    )]
    pub async fn send(&self, event: &AppointmentUpdatedEvent) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(event)
            .send()
            .await
            .with_context(|| format!("POST {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            bail!("notifications endpoint answered HTTP {status}");
        }
        Ok(())
    }
}

impl AppointmentNotifier for HttpAppointmentNotifier {
    fn emit(&self, appointment: &Appointment) {
        let event = AppointmentUpdatedEvent::from_appointment(appointment, Utc::now());

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(
                appointment_id = event.id,
                "No async runtime available, dropping appointment notification"
            );
            return;
        };

        let this = self.clone();
        handle.spawn(async move {
            if let Err(e) = this.send(&event).await {
                warn!(appointment_id = event.id, error = ?e, "Appointment notification failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_appended_to_base_path() {
        let timeout = Duration::from_secs(1);

        let n = HttpAppointmentNotifier::new(&Url::parse("http://notify.local").unwrap(), timeout)
            .unwrap();
        assert_eq!(
            n.endpoint().as_str(),
            "http://notify.local/api/appointment-updated"
        );

        let n = HttpAppointmentNotifier::new(
            &Url::parse("http://notify.local/hooks/").unwrap(),
            timeout,
        )
        .unwrap();
        assert_eq!(
            n.endpoint().as_str(),
            "http://notify.local/hooks/api/appointment-updated"
        );
    }

    #[test]
    fn rejects_cannot_be_a_base_urls() {
        let url = Url::parse("mailto:ops@example.com").unwrap();
        assert!(HttpAppointmentNotifier::new(&url, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn emit_without_runtime_does_not_panic() {
        let n = HttpAppointmentNotifier::new(
            &Url::parse("http://127.0.0.1:9").unwrap(),
            Duration::from_millis(10),
        )
        .unwrap();
        n.emit(&Appointment {
            id: 1,
            customer_name: "John Doe".into(),
            start_time: None,
            end_time: None,
            status: Default::default(),
            notes: None,
        });
    }
}
