//! Service-level behavior against hand-written port mocks.
//!
//! The mock repository counts every call so tests can prove that rejected
//! callers never reach storage, and the recording notifier checks that it is
//! only invoked after the write landed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use modkit::{RoleSet, SecurityCtx};
use parking_lot::Mutex;

use appointments::contract::model::{Appointment, AppointmentData, AppointmentId};
use appointments::domain::error::DomainError;
use appointments::domain::ports::AppointmentNotifier;
use appointments::domain::repo::AppointmentsRepository;
use appointments::domain::service::{Service, ServiceConfig};

#[derive(Default)]
struct MockRepo {
    rows: Mutex<Vec<Appointment>>,
    next_id: Mutex<AppointmentId>,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl MockRepo {
    fn with(names: &[&str]) -> Arc<Self> {
        let repo = Arc::new(Self::default());
        for name in names {
            let id = repo.bump_id();
            repo.rows.lock().push(record(id, AppointmentData::for_customer(*name)));
        }
        repo
    }

    fn bump_id(&self) -> AppointmentId {
        let mut next = self.next_id.lock();
        *next += 1;
        *next
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn record(id: AppointmentId, data: AppointmentData) -> Appointment {
    Appointment {
        id,
        customer_name: data.customer_name,
        start_time: data.start_time,
        end_time: data.end_time,
        status: data.status,
        notes: data.notes,
    }
}

#[async_trait::async_trait]
impl AppointmentsRepository for MockRepo {
    async fn list(&self) -> Result<Vec<Appointment>> {
        self.touch();
        Ok(self.rows.lock().clone())
    }

    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        self.touch();
        Ok(self.rows.lock().iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_customer_name(&self, customer_name: &str) -> Result<Vec<Appointment>> {
        self.touch();
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|a| a.customer_name == customer_name)
            .cloned()
            .collect())
    }

    async fn insert(&self, data: AppointmentData) -> Result<Appointment> {
        self.touch();
        let created = record(self.bump_id(), data);
        self.rows.lock().push(created.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(created)
    }

    async fn replace(&self, id: AppointmentId, data: AppointmentData) -> Result<Option<Appointment>> {
        self.touch();
        let mut rows = self.rows.lock();
        let Some(slot) = rows.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        *slot = record(id, data);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Some(slot.clone()))
    }

    async fn remove(&self, id: AppointmentId) -> Result<bool> {
        self.touch();
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() < before)
    }
}

/// Records every emitted appointment along with the repo write count seen at
/// emission time.
struct RecordingNotifier {
    repo: Arc<MockRepo>,
    seen: Mutex<Vec<(Appointment, usize)>>,
}

impl RecordingNotifier {
    fn new(repo: Arc<MockRepo>) -> Arc<Self> {
        Arc::new(Self {
            repo,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn emitted(&self) -> Vec<(Appointment, usize)> {
        self.seen.lock().clone()
    }
}

impl AppointmentNotifier for RecordingNotifier {
    fn emit(&self, appointment: &Appointment) {
        let writes = self.repo.writes.load(Ordering::SeqCst);
        self.seen.lock().push((appointment.clone(), writes));
    }
}

struct Fixture {
    service: Service,
    repo: Arc<MockRepo>,
    notifier: Arc<RecordingNotifier>,
}

fn fixture(names: &[&str]) -> Fixture {
    let repo = MockRepo::with(names);
    let notifier = RecordingNotifier::new(repo.clone());
    let service = Service::new(repo.clone(), notifier.clone(), ServiceConfig::default());
    Fixture {
        service,
        repo,
        notifier,
    }
}

fn admin() -> SecurityCtx {
    SecurityCtx::new(Some("admin@email.com".into()), RoleSet::parse("ROLE_ADMIN"))
}

fn user() -> SecurityCtx {
    SecurityCtx::new(Some("user@email.com".into()), RoleSet::parse("ROLE_USER"))
}

#[tokio::test]
async fn non_admin_is_forbidden_from_admin_operations_without_touching_repo() {
    let f = fixture(&["John Doe"]);

    for ctx in [user(), SecurityCtx::default()] {
        let err = f.service.find_all(&ctx).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { .. }));

        let err = f
            .service
            .update_appointment(&ctx, 1, AppointmentData::for_customer("X"), true)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { .. }));

        let err = f.service.delete_appointment(&ctx, 1).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { .. }));
    }

    assert_eq!(f.repo.calls(), 0);
    assert!(f.notifier.emitted().is_empty());
}

#[tokio::test]
async fn forbidden_takes_precedence_over_validation() {
    let f = fixture(&[]);

    let err = f
        .service
        .update_appointment(&user(), 1, AppointmentData::default(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }));

    let err = f
        .service
        .update_appointment(&admin(), 1, AppointmentData::default(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyCustomerName));
    assert_eq!(f.repo.calls(), 0);
}

#[tokio::test]
async fn read_create_and_search_are_open_to_everyone() {
    let f = fixture(&["John Doe"]);

    let found = f.service.find_by_id(&user(), 1).await.unwrap();
    assert_eq!(found.customer_name, "John Doe");

    let created = f
        .service
        .save_appointment(&SecurityCtx::default(), AppointmentData::for_customer("Jane Roe"))
        .await
        .unwrap();
    assert_eq!(created.id, 2);

    let hits = f
        .service
        .find_by_customer_name(&user(), "Jane Roe")
        .await
        .unwrap();
    assert_eq!(hits, vec![created]);
}

#[tokio::test]
async fn admin_is_authorized_everywhere() {
    let f = fixture(&["A", "B"]);
    let ctx = admin();

    assert_eq!(f.service.find_all(&ctx).await.unwrap().len(), 2);
    f.service.find_by_id(&ctx, 1).await.unwrap();
    f.service
        .save_appointment(&ctx, AppointmentData::for_customer("C"))
        .await
        .unwrap();
    f.service.find_by_customer_name(&ctx, "C").await.unwrap();
    f.service
        .update_appointment(&ctx, 1, AppointmentData::for_customer("A2"), false)
        .await
        .unwrap();
    f.service.delete_appointment(&ctx, 2).await.unwrap();
}

#[tokio::test]
async fn bare_admin_token_is_accepted() {
    let f = fixture(&["A"]);
    let ctx = SecurityCtx::new(None, RoleSet::parse("admin"));
    assert_eq!(f.service.find_all(&ctx).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_with_push_event_notifies_once_after_write() {
    let f = fixture(&["John Doe"]);

    let updated = f
        .service
        .update_appointment(&admin(), 1, AppointmentData::for_customer("Updated Name"), true)
        .await
        .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.customer_name, "Updated Name");

    let emitted = f.notifier.emitted();
    assert_eq!(emitted.len(), 1);
    let (event, writes_at_emit) = &emitted[0];
    assert_eq!(event, &updated);
    assert_eq!(*writes_at_emit, 1, "notification must follow the write");
}

#[tokio::test]
async fn update_without_push_event_stays_silent() {
    let f = fixture(&["John Doe"]);

    f.service
        .update_appointment(&admin(), 1, AppointmentData::for_customer("Quiet"), false)
        .await
        .unwrap();

    assert!(f.notifier.emitted().is_empty());
    assert_eq!(f.service.find_by_id(&admin(), 1).await.unwrap().customer_name, "Quiet");
}

#[tokio::test]
async fn update_of_missing_id_is_not_found_and_silent() {
    let f = fixture(&["John Doe"]);

    let err = f
        .service
        .update_appointment(&admin(), 42, AppointmentData::for_customer("Ghost"), true)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AppointmentNotFound { id: 42 }));
    assert!(f.notifier.emitted().is_empty());
}

#[tokio::test]
async fn rejected_update_never_notifies() {
    let f = fixture(&["John Doe"]);

    let _ = f
        .service
        .update_appointment(&user(), 1, AppointmentData::for_customer("X"), true)
        .await;
    let _ = f
        .service
        .update_appointment(&admin(), 1, AppointmentData::for_customer("   "), true)
        .await;

    assert!(f.notifier.emitted().is_empty());
}

#[tokio::test]
async fn delete_then_read_is_not_found() {
    let f = fixture(&["John Doe"]);

    f.service.delete_appointment(&admin(), 1).await.unwrap();
    let err = f.service.find_by_id(&admin(), 1).await.unwrap_err();
    assert!(matches!(err, DomainError::AppointmentNotFound { id: 1 }));

    let err = f.service.delete_appointment(&admin(), 1).await.unwrap_err();
    assert!(matches!(err, DomainError::AppointmentNotFound { id: 1 }));
}

#[tokio::test]
async fn validation_rules_apply_on_create() {
    let f = fixture(&[]);
    let ctx = SecurityCtx::default();

    let err = f
        .service
        .save_appointment(&ctx, AppointmentData::for_customer(""))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyCustomerName));

    let err = f
        .service
        .save_appointment(&ctx, AppointmentData::for_customer("x".repeat(256)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::CustomerNameTooLong { len: 256, max: 255 }
    ));

    let mut data = AppointmentData::for_customer("Notes Person");
    data.notes = Some("n".repeat(2001));
    let err = f.service.save_appointment(&ctx, data).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "notes"));

    assert_eq!(f.repo.calls(), 0);
}

#[tokio::test]
async fn repository_failures_surface_as_database_errors() {
    struct BrokenRepo;

    #[async_trait::async_trait]
    impl AppointmentsRepository for BrokenRepo {
        async fn list(&self) -> Result<Vec<Appointment>> {
            anyhow::bail!("connection reset")
        }
        async fn find_by_id(&self, _id: AppointmentId) -> Result<Option<Appointment>> {
            anyhow::bail!("connection reset")
        }
        async fn find_by_customer_name(&self, _name: &str) -> Result<Vec<Appointment>> {
            anyhow::bail!("connection reset")
        }
        async fn insert(&self, _data: AppointmentData) -> Result<Appointment> {
            anyhow::bail!("connection reset")
        }
        async fn replace(
            &self,
            _id: AppointmentId,
            _data: AppointmentData,
        ) -> Result<Option<Appointment>> {
            anyhow::bail!("connection reset")
        }
        async fn remove(&self, _id: AppointmentId) -> Result<bool> {
            anyhow::bail!("connection reset")
        }
    }

    let repo = Arc::new(BrokenRepo);
    let notifier = RecordingNotifier::new(MockRepo::with(&[]));
    let service = Service::new(repo, notifier.clone(), ServiceConfig::default());

    let err = service.find_all(&admin()).await.unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));

    let err = service
        .update_appointment(&admin(), 1, AppointmentData::for_customer("X"), true)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));
    assert!(notifier.emitted().is_empty());
}
