use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use modkit::{ProblemResponse, SecurityCtx};
use tracing::{error, info};

use crate::api::rest::dto::{AppointmentDto, AppointmentReq};
use crate::api::rest::error::{invalid_body, invalid_path, map_domain_error};
use crate::contract::model::AppointmentId;
use crate::domain::access::OperationKind;
use crate::domain::service::Service;

/// Report a malformed request, unless the caller may not make it at all.
/// An unauthorized caller never learns anything about payload or path rules.
fn reject_after_access_check(
    svc: &Service,
    ctx: &SecurityCtx,
    operation: OperationKind,
    uri: &Uri,
    problem: ProblemResponse,
) -> ProblemResponse {
    match svc.authorize(ctx, operation) {
        Ok(()) => problem,
        Err(e) => map_domain_error(&e, uri.path()),
    }
}

fn authorized_body(
    svc: &Service,
    ctx: &SecurityCtx,
    operation: OperationKind,
    body: Result<Json<AppointmentReq>, JsonRejection>,
    uri: &Uri,
) -> Result<AppointmentReq, ProblemResponse> {
    body.map(|Json(req)| req).map_err(|rejection| {
        let problem = invalid_body(rejection.body_text(), uri.path());
        reject_after_access_check(svc, ctx, operation, uri, problem)
    })
}

fn authorized_path<T>(
    svc: &Service,
    ctx: &SecurityCtx,
    operation: OperationKind,
    path: Result<Path<T>, PathRejection>,
    uri: &Uri,
) -> Result<T, ProblemResponse> {
    path.map(|Path(value)| value).map_err(|rejection| {
        let problem = invalid_path(rejection.body_text(), uri.path());
        reject_after_access_check(svc, ctx, operation, uri, problem)
    })
}

/// Boolean path flag. Accepts `true/false`, `1/0`, `yes/no` and `on/off`
/// in any letter case.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// List all appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "appointments",
    params(
        ("X-User-Roles" = Option<String>, Header, description = "Caller roles, e.g. ROLE_ADMIN"),
    ),
    responses(
        (status = 200, description = "All appointments", body = [AppointmentDto]),
        (status = 403, description = "ADMIN role required", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem),
    )
)]
pub async fn list_appointments(
    Extension(svc): Extension<Arc<Service>>,
    ctx: SecurityCtx,
    uri: Uri,
) -> Result<Json<Vec<AppointmentDto>>, ProblemResponse> {
    info!("Listing appointments");

    match svc.find_all(&ctx).await {
        Ok(appointments) => Ok(Json(
            appointments.into_iter().map(AppointmentDto::from).collect(),
        )),
        Err(e) => {
            error!("Failed to list appointments: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific appointment by ID
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment found", body = AppointmentDto),
        (status = 400, description = "Malformed id", body = modkit::Problem),
        (status = 404, description = "Not Found", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem),
    )
)]
pub async fn get_appointment(
    Extension(svc): Extension<Arc<Service>>,
    ctx: SecurityCtx,
    path: Result<Path<AppointmentId>, PathRejection>,
    uri: Uri,
) -> Result<Json<AppointmentDto>, ProblemResponse> {
    let id = authorized_path(&svc, &ctx, OperationKind::Read, path, &uri)?;
    info!("Getting appointment with id: {}", id);

    match svc.find_by_id(&ctx, id).await {
        Ok(appointment) => Ok(Json(AppointmentDto::from(appointment))),
        Err(e) => {
            error!("Failed to get appointment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Find the appointments booked under a customer name
#[utoipa::path(
    get,
    path = "/api/appointments/customer/{name}",
    tag = "appointments",
    params(("name" = String, Path, description = "Exact customer name")),
    responses(
        (status = 200, description = "Matching appointments", body = [AppointmentDto]),
        (status = 400, description = "Malformed name", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem),
    )
)]
pub async fn find_by_customer_name(
    Extension(svc): Extension<Arc<Service>>,
    ctx: SecurityCtx,
    path: Result<Path<String>, PathRejection>,
    uri: Uri,
) -> Result<Json<Vec<AppointmentDto>>, ProblemResponse> {
    let name = authorized_path(&svc, &ctx, OperationKind::SearchByCustomer, path, &uri)?;
    info!("Searching appointments for customer: {}", name);

    match svc.find_by_customer_name(&ctx, &name).await {
        Ok(appointments) => Ok(Json(
            appointments.into_iter().map(AppointmentDto::from).collect(),
        )),
        Err(e) => {
            error!("Failed to search appointments for {}: {}", name, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a new appointment
#[utoipa::path(
    post,
    path = "/api/appointments/create",
    tag = "appointments",
    request_body = AppointmentReq,
    responses(
        (status = 200, description = "Created appointment", body = AppointmentDto),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem),
    )
)]
pub async fn create_appointment(
    Extension(svc): Extension<Arc<Service>>,
    ctx: SecurityCtx,
    uri: Uri,
    body: Result<Json<AppointmentReq>, JsonRejection>,
) -> Result<Json<AppointmentDto>, ProblemResponse> {
    let req = authorized_body(&svc, &ctx, OperationKind::Create, body, &uri)?;
    info!("Creating appointment: {:?}", req);

    match svc.save_appointment(&ctx, req.into()).await {
        Ok(appointment) => Ok(Json(AppointmentDto::from(appointment))),
        Err(e) => {
            error!("Failed to create appointment: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Replace an existing appointment, optionally announcing the change
#[utoipa::path(
    put,
    path = "/api/appointments/update/{id}/{push_event}",
    tag = "appointments",
    params(
        ("id" = i64, Path, description = "Appointment id"),
        ("push_event" = String, Path, description = "Notify after the update (true/false, 1/0, yes/no, on/off)"),
        ("X-User-Roles" = Option<String>, Header, description = "Caller roles, e.g. ROLE_ADMIN"),
    ),
    request_body = AppointmentReq,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentDto),
        (status = 400, description = "Bad Request", body = modkit::Problem),
        (status = 403, description = "ADMIN role required", body = modkit::Problem),
        (status = 404, description = "Not Found", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem),
    )
)]
pub async fn update_appointment(
    Extension(svc): Extension<Arc<Service>>,
    ctx: SecurityCtx,
    path: Result<Path<(AppointmentId, String)>, PathRejection>,
    uri: Uri,
    body: Result<Json<AppointmentReq>, JsonRejection>,
) -> Result<Json<AppointmentDto>, ProblemResponse> {
    let (id, raw_flag) = authorized_path(&svc, &ctx, OperationKind::Update, path, &uri)?;
    let push_event = parse_flag(&raw_flag).ok_or_else(|| {
        let problem = invalid_path(format!("Invalid push_event flag: {raw_flag:?}"), uri.path());
        reject_after_access_check(&svc, &ctx, OperationKind::Update, &uri, problem)
    })?;
    let req = authorized_body(&svc, &ctx, OperationKind::Update, body, &uri)?;
    info!("Updating appointment {} (push_event={}) with: {:?}", id, push_event, req);

    match svc.update_appointment(&ctx, id, req.into(), push_event).await {
        Ok(appointment) => Ok(Json(AppointmentDto::from(appointment))),
        Err(e) => {
            error!("Failed to update appointment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete an appointment by ID
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "appointments",
    params(
        ("id" = i64, Path, description = "Appointment id"),
        ("X-User-Roles" = Option<String>, Header, description = "Caller roles, e.g. ROLE_ADMIN"),
    ),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 400, description = "Malformed id", body = modkit::Problem),
        (status = 403, description = "ADMIN role required", body = modkit::Problem),
        (status = 404, description = "Not Found", body = modkit::Problem),
        (status = 500, description = "Internal Server Error", body = modkit::Problem),
    )
)]
pub async fn delete_appointment(
    Extension(svc): Extension<Arc<Service>>,
    ctx: SecurityCtx,
    path: Result<Path<AppointmentId>, PathRejection>,
    uri: Uri,
) -> Result<StatusCode, ProblemResponse> {
    let id = authorized_path(&svc, &ctx, OperationKind::Delete, path, &uri)?;
    info!("Deleting appointment: {}", id);

    match svc.delete_appointment(&ctx, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete appointment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_accepts_common_boolean_spellings() {
        for raw in ["true", "TRUE", "True", "1", "yes", "On"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["false", "FALSE", "0", "no", "OFF"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        for raw in ["", "maybe", "2", "truee"] {
            assert_eq!(parse_flag(raw), None, "{raw}");
        }
    }
}
