use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use database_layer::{tables, MemoryStore, PractitionerId};
use error_common::{ClinicError, NotificationVariant, RecordingNotifier};
use records_service::*;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

const DOCTOR: &str = "user_2abc";
const OTHER_DOCTOR: &str = "user_9xyz";

struct Fixture {
    remote: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            remote: Arc::new(MemoryStore::new()),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    async fn store<E: Entity>(&self) -> EntityStore<E> {
        let mut store = EntityStore::new(self.remote.clone(), self.notifier.clone());
        store.attach(PractitionerId::new(DOCTOR)).await.unwrap();
        store
    }
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn foreign_patient() -> serde_json::Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "doctor_id": OTHER_DOCTOR,
        "full_name": "Someone Else",
        "phone": "555-0199",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_created_patient_is_listed_first() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;

    let first = patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();
    let second = patients.add(PatientDraft::new("Ravi Kumar", "555-0101")).await.unwrap();

    assert_eq!(first.doctor_id, DOCTOR);
    let ids: Vec<Uuid> = patients.rows().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let last = fx.notifier.last().unwrap();
    assert_eq!(last.description, "Patient added successfully");
    assert_eq!(last.variant, NotificationVariant::Default);

    // A fresh store sees the same rows from the remote side
    let reloaded: PatientStore = fx.store().await;
    assert_eq!(reloaded.rows().len(), 2);
    assert!(!reloaded.loading());
}

#[tokio::test]
async fn test_rows_of_other_practitioners_are_invisible() {
    let fx = Fixture::new();
    let foreign = foreign_patient();
    let foreign_id: Uuid = foreign["id"].as_str().unwrap().parse().unwrap();
    fx.remote.seed(tables::PATIENTS, vec![foreign]).unwrap();

    let mut patients: PatientStore = fx.store().await;
    assert!(patients.rows().is_empty());

    let changes = PatientChanges {
        full_name: Some("Hijacked".to_string()),
        ..Default::default()
    };
    let err = patients.update(foreign_id, changes).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(fx.notifier.has_failure());

    patients.delete(foreign_id).await.unwrap();
    let stored = fx.remote.rows(tables::PATIENTS);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["full_name"], "Someone Else");
}

#[tokio::test]
async fn test_failed_add_notifies_and_keeps_list() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;
    patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();
    fx.notifier.take();

    fx.remote.fail_next("connection reset by peer");
    let err = patients
        .add(PatientDraft::new("Ravi Kumar", "555-0101"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClinicError::NetworkError(_)));
    assert_eq!(patients.rows().len(), 1);
    let notifications = fx.notifier.take();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].description, "Failed to add patient");
    assert_eq!(notifications[0].variant, NotificationVariant::Destructive);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_rows() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;
    patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();

    fx.remote.fail_next("timeout");
    assert!(patients.fetch().await.is_err());
    assert_eq!(patients.rows().len(), 1);
    assert!(!patients.loading());
    assert_eq!(
        fx.notifier.last().unwrap().description,
        "Failed to fetch patients"
    );
}

#[tokio::test]
async fn test_loading_until_first_fetch_finishes() {
    let fx = Fixture::new();
    let mut patients = PatientStore::new(fx.remote.clone(), fx.notifier.clone());
    assert!(patients.loading());

    patients.attach(PractitionerId::new(DOCTOR)).await.unwrap();
    assert!(!patients.loading());

    patients.detach();
    assert!(patients.loading());

    // A failed first fetch still ends the loading state
    fx.remote.fail_next("timeout");
    assert!(patients.attach(PractitionerId::new(DOCTOR)).await.is_err());
    assert!(!patients.loading());
}

#[tokio::test]
async fn test_unattached_store_requires_sign_in() {
    let fx = Fixture::new();
    let mut patients = PatientStore::new(fx.remote.clone(), fx.notifier.clone());

    let err = patients
        .add(PatientDraft::new("Asha Rao", "555-0100"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicError::AuthError(_)));
    assert!(fx.remote.rows(tables::PATIENTS).is_empty());
}

#[tokio::test]
async fn test_invalid_draft_is_rejected_locally() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;

    let err = patients.add(PatientDraft::new("  ", "555-0100")).await.unwrap_err();
    assert!(matches!(err, ClinicError::ValidationError(_)));
    assert!(fx.remote.rows(tables::PATIENTS).is_empty());
}

#[tokio::test]
async fn test_patient_search_matches_name_or_phone() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;
    patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();
    patients.add(PatientDraft::new("Ravi Kumar", "555-0199")).await.unwrap();

    assert_eq!(patients.search("ASHA").len(), 1);
    assert_eq!(patients.search("0199")[0].full_name, "Ravi Kumar");
    assert_eq!(patients.search("").len(), 2);
    assert!(patients.search("nobody").is_empty());
}

#[tokio::test]
async fn test_appointments_are_chronological_and_appended() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;
    let asha = patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();

    let mut appointments: AppointmentStore = fx.store().await;
    let late = appointments
        .add(AppointmentDraft::new(asha.id, date(2024, 6, 11), time(9, 0)))
        .await
        .unwrap();
    let early = appointments
        .add(AppointmentDraft::new(asha.id, date(2024, 6, 10), time(15, 30)))
        .await
        .unwrap();

    // Appended locally in creation order
    let local: Vec<Uuid> = appointments.rows().iter().map(|a| a.id).collect();
    assert_eq!(local, vec![late.id, early.id]);
    assert_eq!(early.patient_name(), Some("Asha Rao"));

    // Store order after a refetch
    appointments.fetch().await.unwrap();
    let fetched: Vec<Uuid> = appointments.rows().iter().map(|a| a.id).collect();
    assert_eq!(fetched, vec![early.id, late.id]);
    assert_eq!(appointments.on_date(date(2024, 6, 10)).len(), 1);
}

#[tokio::test]
async fn test_deleting_appointment_removes_it_everywhere() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;
    let asha = patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();

    let mut appointments: AppointmentStore = fx.store().await;
    let appt = appointments
        .add(AppointmentDraft::new(asha.id, date(2024, 6, 10), time(10, 0)))
        .await
        .unwrap();

    appointments.delete(appt.id).await.unwrap();

    assert!(appointments.rows().is_empty());
    assert!(fx.remote.rows(tables::APPOINTMENTS).is_empty());
    assert_eq!(
        fx.notifier.last().unwrap().description,
        "Appointment cancelled successfully"
    );
}

#[tokio::test]
async fn test_reschedule_confirms_and_start_marks_in_progress() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;
    let asha = patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();

    let mut appointments: AppointmentStore = fx.store().await;
    let appt = appointments
        .add(AppointmentDraft::new(asha.id, date(2024, 6, 10), time(10, 0)))
        .await
        .unwrap();
    assert_eq!(appt.status, AppointmentStatus::Pending);

    let moved = appointments
        .reschedule(appt.id, date(2024, 6, 12), time(11, 15))
        .await
        .unwrap();
    assert_eq!(moved.status, AppointmentStatus::Confirmed);
    assert_eq!(moved.appointment_time, time(11, 15));

    let links = MeetingLinks::default();
    let joined = appointments.join(appt.id, &links).await.unwrap();
    assert!(joined.starts_with("https://meet.jit.si/docconnect-asha-rao-"));
    assert_eq!(appointments.join(appt.id, &links).await.unwrap(), joined);

    let started = appointments.start(appt.id, &links).await.unwrap();
    assert_eq!(started, joined);
    let stored = appointments.find(appt.id).unwrap();
    assert_eq!(stored.status, AppointmentStatus::InProgress);
    assert_eq!(fx.remote.rows(tables::APPOINTMENTS)[0]["status"], "in_progress");
}

#[tokio::test]
async fn test_prescriptions_newest_first_and_completion() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;
    let asha = patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();

    let mut prescriptions: PrescriptionStore = fx.store().await;
    let mut older = PrescriptionDraft::new(asha.id, "Amoxicillin", "500mg", "3x daily", "7 days");
    older.prescribed_date = date(2024, 5, 1);
    let older = prescriptions.add(older).await.unwrap();
    let newer = prescriptions
        .add(PrescriptionDraft::new(asha.id, "Paracetamol", "650mg", "as needed", "3 days"))
        .await
        .unwrap();

    let ids: Vec<Uuid> = prescriptions.rows().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let done = prescriptions.complete(older.id).await.unwrap();
    assert_eq!(done.status, PrescriptionStatus::Completed);
    assert_eq!(prescriptions.search("asha").len(), 2);
    assert_eq!(prescriptions.search("amoxi")[0].id, older.id);
}

#[tokio::test]
async fn test_teleconsultation_room_named_after_patient() {
    let fx = Fixture::new();
    let mut patients: PatientStore = fx.store().await;
    let asha = patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();

    let mut consults: TeleconsultationStore = fx.store().await;
    let links = MeetingLinks::new("https://meet.jit.si", "docconnect");
    let consult = consults
        .schedule(
            ScheduleRequest::new(asha.id, date(2024, 6, 10), time(16, 0)),
            patients.name_of(asha.id),
            &links,
        )
        .await
        .unwrap();

    assert!(consult
        .meeting_url
        .starts_with("https://meet.jit.si/docconnect-asha-rao-"));
    assert_eq!(consult.duration, DEFAULT_DURATION);
    assert_eq!(consult.status, TeleconsultationStatus::Scheduled);
    assert_eq!(consult.patient_name(), Some("Asha Rao"));

    let waiting = consults
        .set_status(consult.id, TeleconsultationStatus::Waiting)
        .await
        .unwrap();
    assert_eq!(waiting.status, TeleconsultationStatus::Waiting);
    assert_eq!(consults.upcoming(date(2024, 6, 1)).len(), 1);
}

#[tokio::test]
async fn test_dashboard_figures() {
    let fx = Fixture::new();
    let today = records_service::today();
    let last_month = today.with_day(1).unwrap() - Duration::days(1);

    let mut patients: PatientStore = fx.store().await;
    let asha = patients.add(PatientDraft::new("Asha Rao", "555-0100")).await.unwrap();
    patients.add(PatientDraft::new("Ravi Kumar", "555-0101")).await.unwrap();

    let mut appointments: AppointmentStore = fx.store().await;
    for hour in [9, 10, 11, 12] {
        appointments
            .add(AppointmentDraft::new(asha.id, today, time(hour, 0)))
            .await
            .unwrap();
    }
    appointments
        .add(AppointmentDraft::new(asha.id, last_month, time(9, 0)))
        .await
        .unwrap();
    appointments.fetch().await.unwrap();

    let mut prescriptions: PrescriptionStore = fx.store().await;
    let fresh = prescriptions
        .add(PrescriptionDraft::new(asha.id, "Paracetamol", "650mg", "as needed", "3 days"))
        .await
        .unwrap();
    // New prescriptions are dated on the same calendar the dashboard counts by
    assert_eq!(fresh.prescribed_date, today);
    let mut old = PrescriptionDraft::new(asha.id, "Cetirizine", "10mg", "nightly", "5 days");
    old.prescribed_date = last_month;
    prescriptions.add(old).await.unwrap();

    let stats = DashboardStats::compute(
        today,
        appointments.rows(),
        patients.rows(),
        prescriptions.rows(),
        Decimal::new(150_000, 2),
    );

    assert_eq!(stats.todays_appointments, 4);
    assert_eq!(stats.total_patients, 2);
    assert_eq!(stats.monthly_prescriptions, 1);
    assert_eq!(stats.monthly_revenue, Decimal::new(1500, 0));
    assert_eq!(stats.recent_appointments.len(), 3);
    assert_eq!(stats.recent_appointments[0].appointment_time, time(9, 0));
    assert_eq!(prescriptions.count_in_month(today), 1);
}
