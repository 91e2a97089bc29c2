use std::sync::Arc;

use modkit::SecurityCtx;
use tracing::{debug, info, instrument, warn};

use crate::contract::model::{Appointment, AppointmentData, AppointmentId};
use crate::domain::access::{self, AccessDecision, OperationKind};
use crate::domain::error::DomainError;
use crate::domain::ports::AppointmentNotifier;
use crate::domain::repo::AppointmentsRepository;

/// Domain service with business rules for appointment management.
/// Depends only on the repository and notifier ports, not on infra types.
///
/// Every operation receives the caller's [`SecurityCtx`] and checks it before
/// touching the repository.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn AppointmentsRepository>,
    notifier: Arc<dyn AppointmentNotifier>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_customer_name_length: usize,
    pub max_notes_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_customer_name_length: 255,
            max_notes_length: 2000,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn AppointmentsRepository>,
        notifier: Arc<dyn AppointmentNotifier>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            notifier,
            config,
        }
    }

    #[instrument(name = "appointments.service.find_all", skip_all)]
    pub async fn find_all(&self, ctx: &SecurityCtx) -> Result<Vec<Appointment>, DomainError> {
        self.authorize(ctx, OperationKind::List)?;
        debug!("Listing all appointments");

        let appointments = self
            .repo
            .list()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Listed {} appointments", appointments.len());
        Ok(appointments)
    }

    #[instrument(
        name = "appointments.service.find_by_id",
        skip(self, ctx),
        fields(appointment_id = id)
    )]
    pub async fn find_by_id(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
    ) -> Result<Appointment, DomainError> {
        self.authorize(ctx, OperationKind::Read)?;
        debug!("Getting appointment by id");

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))
    }

    #[instrument(
        name = "appointments.service.find_by_customer_name",
        skip(self, ctx, customer_name),
        fields(customer_name = %customer_name)
    )]
    pub async fn find_by_customer_name(
        &self,
        ctx: &SecurityCtx,
        customer_name: &str,
    ) -> Result<Vec<Appointment>, DomainError> {
        self.authorize(ctx, OperationKind::SearchByCustomer)?;
        debug!("Searching appointments by customer name");

        let found = self
            .repo
            .find_by_customer_name(customer_name)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Found {} appointments", found.len());
        Ok(found)
    }

    #[instrument(
        name = "appointments.service.save_appointment",
        skip(self, ctx, data),
        fields(customer_name = %data.customer_name)
    )]
    pub async fn save_appointment(
        &self,
        ctx: &SecurityCtx,
        data: AppointmentData,
    ) -> Result<Appointment, DomainError> {
        self.authorize(ctx, OperationKind::Create)?;
        info!("Creating new appointment");

        self.validate(&data)?;

        let created = self
            .repo
            .insert(data)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created appointment with id={}", created.id);
        Ok(created)
    }

    #[instrument(
        name = "appointments.service.update_appointment",
        skip(self, ctx, data),
        fields(appointment_id = id)
    )]
    pub async fn update_appointment(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
        data: AppointmentData,
        push_event: bool,
    ) -> Result<Appointment, DomainError> {
        self.authorize(ctx, OperationKind::Update)?;
        info!("Updating appointment");

        self.validate(&data)?;

        let updated = self
            .repo
            .replace(id, data)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;

        // Only reached once the write is committed.
        if push_event {
            debug!("Emitting appointment change notification");
            self.notifier.emit(&updated);
        }

        info!("Successfully updated appointment");
        Ok(updated)
    }

    #[instrument(
        name = "appointments.service.delete_appointment",
        skip(self, ctx),
        fields(appointment_id = id)
    )]
    pub async fn delete_appointment(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
    ) -> Result<(), DomainError> {
        self.authorize(ctx, OperationKind::Delete)?;
        info!("Deleting appointment");

        let deleted = self
            .repo
            .remove(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::appointment_not_found(id));
        }

        info!("Successfully deleted appointment");
        Ok(())
    }

    // --- access & validation helpers ---

    /// Check `ctx` against the access policy for `operation`.
    pub fn authorize(
        &self,
        ctx: &SecurityCtx,
        operation: OperationKind,
    ) -> Result<(), DomainError> {
        match access::authorize(operation, ctx.roles()) {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny { required } => {
                warn!(
                    operation = %operation,
                    caller = ctx.email().unwrap_or("<anonymous>"),
                    roles = %ctx.roles(),
                    "Access denied"
                );
                Err(DomainError::forbidden(operation, required))
            }
        }
    }

    fn validate(&self, data: &AppointmentData) -> Result<(), DomainError> {
        self.validate_customer_name(&data.customer_name)?;
        if let Some(notes) = &data.notes {
            let len = notes.chars().count();
            if len > self.config.max_notes_length {
                return Err(DomainError::validation(
                    "notes",
                    format!(
                        "too long: {len} characters (max: {})",
                        self.config.max_notes_length
                    ),
                ));
            }
        }
        Ok(())
    }

    fn validate_customer_name(&self, customer_name: &str) -> Result<(), DomainError> {
        if customer_name.trim().is_empty() {
            return Err(DomainError::empty_customer_name());
        }
        let len = customer_name.chars().count();
        if len > self.config.max_customer_name_length {
            return Err(DomainError::customer_name_too_long(
                len,
                self.config.max_customer_name_length,
            ));
        }
        Ok(())
    }
}
