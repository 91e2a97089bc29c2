use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::{handlers, openapi};
use crate::domain::service::Service;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        // Static segments win over `{id}` in axum's matcher.
        .route("/api/appointments/openapi.json", get(openapi::openapi_json))
        .route("/api/appointments", get(handlers::list_appointments))
        .route("/api/appointments/create", post(handlers::create_appointment))
        .route(
            "/api/appointments/customer/{name}",
            get(handlers::find_by_customer_name),
        )
        .route(
            "/api/appointments/update/{id}/{push_event}",
            put(handlers::update_appointment),
        )
        .route(
            "/api/appointments/{id}",
            get(handlers::get_appointment).delete(handlers::delete_appointment),
        )
        .layer(Extension(service))
}
