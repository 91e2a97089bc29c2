//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be constructed with a
//! `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::contract::model::{Appointment, AppointmentData, AppointmentId};
use crate::domain::repo::AppointmentsRepository;
use crate::infra::storage::entity::{Column, Entity as AppointmentEntity};
use crate::infra::storage::mapper::{new_active_model, replacing_active_model};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> AppointmentsRepository for SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list(&self) -> anyhow::Result<Vec<Appointment>> {
        let rows = AppointmentEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("list failed")?;
        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn find_by_id(&self, id: AppointmentId) -> anyhow::Result<Option<Appointment>> {
        let found = AppointmentEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        found.map(Appointment::try_from).transpose()
    }

    async fn find_by_customer_name(
        &self,
        customer_name: &str,
    ) -> anyhow::Result<Vec<Appointment>> {
        let rows = AppointmentEntity::find()
            .filter(Column::CustomerName.eq(customer_name))
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("find_by_customer_name failed")?;
        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn insert(&self, data: AppointmentData) -> anyhow::Result<Appointment> {
        let model = new_active_model(data)
            .insert(&self.conn)
            .await
            .context("insert failed")?;
        Appointment::try_from(model)
    }

    async fn replace(
        &self,
        id: AppointmentId,
        data: AppointmentData,
    ) -> anyhow::Result<Option<Appointment>> {
        match replacing_active_model(id, data).update(&self.conn).await {
            Ok(model) => Appointment::try_from(model).map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("replace failed")),
        }
    }

    async fn remove(&self, id: AppointmentId) -> anyhow::Result<bool> {
        let res = AppointmentEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("remove failed")?;
        Ok(res.rows_affected > 0)
    }
}
