use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use url::Url;

use crate::api::rest::routes;
use crate::config::AppointmentsConfig;
use crate::contract::client::AppointmentsApi;
use crate::domain::ports::AppointmentNotifier;
use crate::domain::service::Service;
use crate::gateways::local::AppointmentsLocalClient;
use crate::infra::notify::{HttpAppointmentNotifier, TracingNotifier};
use crate::infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmAppointmentsRepository};

/// The appointments module: a wired domain service plus its REST surface and
/// in-process client.
#[derive(Clone)]
pub struct Appointments {
    service: Arc<Service>,
}

impl Appointments {
    /// Run migrations and wire repository and notifier into the service.
    pub async fn init(cfg: AppointmentsConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        info!("Initializing appointments module");
        debug!(
            "Loaded appointments config: max_customer_name_length={}, notifications_base_url={:?}",
            cfg.max_customer_name_length, cfg.notifications_base_url
        );

        info!("Running appointments database migrations");
        Migrator::up(&db, None)
            .await
            .context("appointments migrations failed")?;

        let notifier = build_notifier(&cfg)?;
        let repo = SeaOrmAppointmentsRepository::new(db);
        let service = Service::new(Arc::new(repo), notifier, cfg.service_config());

        info!("Appointments module initialized");
        Ok(Self::from_service(Arc::new(service)))
    }

    pub fn from_service(service: Arc<Service>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Local in-process client for other modules.
    pub fn client(&self) -> Arc<dyn AppointmentsApi> {
        Arc::new(AppointmentsLocalClient::new(self.service.clone()))
    }

    pub fn router(&self) -> axum::Router {
        info!("Registering appointments REST routes");
        routes::register_routes(axum::Router::new(), self.service.clone())
    }
}

fn build_notifier(cfg: &AppointmentsConfig) -> anyhow::Result<Arc<dyn AppointmentNotifier>> {
    match cfg.notifications_base_url.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            let base = Url::parse(raw)
                .with_context(|| format!("invalid notifications_base_url: {raw}"))?;
            let notifier = HttpAppointmentNotifier::new(
                &base,
                Duration::from_millis(cfg.notify_timeout_ms),
            )?;
            info!(endpoint = %notifier.endpoint(), "Appointment notifications go over HTTP");
            Ok(Arc::new(notifier))
        }
        _ => {
            info!("No notifications endpoint configured, notifications are logged only");
            Ok(Arc::new(TracingNotifier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_choice_follows_config() {
        assert!(build_notifier(&AppointmentsConfig::default()).is_ok());

        let cfg = AppointmentsConfig {
            notifications_base_url: Some("http://notify.local:9000".into()),
            ..Default::default()
        };
        assert!(build_notifier(&cfg).is_ok());

        let cfg = AppointmentsConfig {
            notifications_base_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(build_notifier(&cfg).is_err());
    }
}
