use axum::response::Json;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

#[derive(OpenApi)]
#[openapi(
    info(title = "Appointments API", description = "Appointment booking"),
    paths(
        handlers::list_appointments,
        handlers::get_appointment,
        handlers::find_by_customer_name,
        handlers::create_appointment,
        handlers::update_appointment,
        handlers::delete_appointment,
    ),
    components(schemas(
        dto::AppointmentDto,
        dto::AppointmentReq,
        dto::AppointmentStatusDto,
        modkit::Problem,
    )),
    tags((name = "appointments", description = "Appointment booking endpoints"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in [
            "/api/appointments",
            "/api/appointments/{id}",
            "/api/appointments/customer/{name}",
            "/api/appointments/create",
            "/api/appointments/update/{id}/{push_event}",
        ] {
            assert!(paths.contains(&p), "missing {p}");
        }
    }
}
