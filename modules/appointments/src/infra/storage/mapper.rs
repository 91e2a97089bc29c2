use anyhow::anyhow;
use sea_orm::{ActiveValue::NotSet, Set};

use crate::contract::model::{Appointment, AppointmentData, AppointmentId, AppointmentStatus};
use crate::infra::storage::entity::{ActiveModel, Model};

impl TryFrom<Model> for Appointment {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let status = AppointmentStatus::parse(&m.status)
            .ok_or_else(|| anyhow!("appointment {} has unknown status '{}'", m.id, m.status))?;
        Ok(Self {
            id: m.id,
            customer_name: m.customer_name,
            start_time: m.start_time,
            end_time: m.end_time,
            status,
            notes: m.notes,
        })
    }
}

/// Active model for a brand-new row; the id is left to the database.
pub fn new_active_model(data: AppointmentData) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        customer_name: Set(data.customer_name),
        start_time: Set(data.start_time),
        end_time: Set(data.end_time),
        status: Set(data.status.as_str().to_string()),
        notes: Set(data.notes),
    }
}

/// Active model overwriting every mutable column of row `id`.
pub fn replacing_active_model(id: AppointmentId, data: AppointmentData) -> ActiveModel {
    ActiveModel {
        id: Set(id),
        ..new_active_model(data)
    }
}
