//! Pure mapping and configuration checks, no I/O.

use appointments::config::AppointmentsConfig;
use appointments::contract::error::AppointmentsError;
use appointments::domain::access::OperationKind;
use appointments::domain::error::DomainError;

#[test]
fn domain_errors_keep_their_kind_at_the_contract_boundary() {
    assert_eq!(
        AppointmentsError::from(DomainError::forbidden(OperationKind::Update, "ADMIN")),
        AppointmentsError::forbidden("update", "ADMIN")
    );
    assert_eq!(
        AppointmentsError::from(DomainError::appointment_not_found(5)),
        AppointmentsError::not_found(5)
    );
    assert!(matches!(
        AppointmentsError::from(DomainError::empty_customer_name()),
        AppointmentsError::Validation { .. }
    ));
    assert!(matches!(
        AppointmentsError::from(DomainError::customer_name_too_long(300, 255)),
        AppointmentsError::Validation { ref message } if message.contains("300")
    ));
    assert_eq!(
        AppointmentsError::from(DomainError::database("locked")),
        AppointmentsError::Internal
    );
}

#[test]
fn contract_errors_hide_database_details() {
    let err = AppointmentsError::from(DomainError::database("no such table: appointments"));
    assert_eq!(err.to_string(), "Internal error");
}

#[test]
fn config_defaults_apply_to_missing_keys() {
    let cfg: AppointmentsConfig = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(cfg.max_customer_name_length, 255);
    assert_eq!(cfg.max_notes_length, 2000);
    assert_eq!(cfg.notify_timeout_ms, 5000);
    assert!(cfg.notifications_base_url.is_none());

    let service_cfg = cfg.service_config();
    assert_eq!(service_cfg.max_customer_name_length, 255);
}

#[test]
fn config_rejects_unknown_keys() {
    let res: Result<AppointmentsConfig, _> =
        serde_json::from_value(serde_json::json!({ "max_name": 10 }));
    assert!(res.is_err());
}

#[test]
fn config_reads_notification_settings() {
    let cfg: AppointmentsConfig = serde_json::from_value(serde_json::json!({
        "notifications_base_url": "http://notify.local:9000",
        "notify_timeout_ms": 250
    }))
    .unwrap();
    assert_eq!(
        cfg.notifications_base_url.as_deref(),
        Some("http://notify.local:9000")
    );
    assert_eq!(cfg.notify_timeout_ms, 250);
}
