use async_trait::async_trait;
use modkit::SecurityCtx;
use std::sync::Arc;

use crate::contract::{
    client::AppointmentsApi,
    error::AppointmentsError,
    model::{Appointment, AppointmentData, AppointmentId},
};
use crate::domain::service::Service;

/// Local implementation of the AppointmentsApi trait that delegates to the domain service
pub struct AppointmentsLocalClient {
    service: Arc<Service>,
}

impl AppointmentsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AppointmentsApi for AppointmentsLocalClient {
    async fn list_appointments(
        &self,
        ctx: &SecurityCtx,
    ) -> Result<Vec<Appointment>, AppointmentsError> {
        self.service.find_all(ctx).await.map_err(Into::into)
    }

    async fn get_appointment(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
    ) -> Result<Appointment, AppointmentsError> {
        self.service.find_by_id(ctx, id).await.map_err(Into::into)
    }

    async fn find_by_customer_name(
        &self,
        ctx: &SecurityCtx,
        customer_name: &str,
    ) -> Result<Vec<Appointment>, AppointmentsError> {
        self.service
            .find_by_customer_name(ctx, customer_name)
            .await
            .map_err(Into::into)
    }

    async fn create_appointment(
        &self,
        ctx: &SecurityCtx,
        data: AppointmentData,
    ) -> Result<Appointment, AppointmentsError> {
        self.service
            .save_appointment(ctx, data)
            .await
            .map_err(Into::into)
    }

    async fn update_appointment(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
        data: AppointmentData,
        push_event: bool,
    ) -> Result<Appointment, AppointmentsError> {
        self.service
            .update_appointment(ctx, id, data, push_event)
            .await
            .map_err(Into::into)
    }

    async fn delete_appointment(
        &self,
        ctx: &SecurityCtx,
        id: AppointmentId,
    ) -> Result<(), AppointmentsError> {
        self.service
            .delete_appointment(ctx, id)
            .await
            .map_err(Into::into)
    }
}
