//! Clinical records for ClinicDesk
//!
//! One [`EntityStore`] per owner-scoped table keeps a local list of the
//! signed-in practitioner's rows in step with the hosted database:
//! - [`PatientStore`]: newest first, searchable by name or phone
//! - [`AppointmentStore`]: chronological, with rescheduling and video joins
//! - [`PrescriptionStore`]: newest first, with completion and cancellation
//! - [`TeleconsultationStore`]: chronological, rooms generated at scheduling
//!
//! [`MeetingLinks`] builds video room URLs and [`DashboardStats`] summarises
//! the stores for the landing page.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use database_layer::{MemoryStore, PractitionerId};
//! use error_common::RecordingNotifier;
//! use records_service::{PatientDraft, PatientStore};
//!
//! # tokio_test::block_on(async {
//! let notifier = Arc::new(RecordingNotifier::new());
//! let mut patients = PatientStore::new(Arc::new(MemoryStore::new()), notifier.clone());
//!
//! patients.attach(PractitionerId::new("user_2abc")).await?;
//! patients.add(PatientDraft::new("Asha Rao", "555-0100")).await?;
//!
//! assert_eq!(patients.search("asha").len(), 1);
//! assert_eq!(notifier.last().unwrap().description, "Patient added successfully");
//! # Ok::<(), error_common::ClinicError>(())
//! # }).unwrap();
//! ```

use chrono::{Datelike, NaiveDate, Utc};

pub mod appointments;
pub mod dashboard;
pub mod entity;
pub mod meeting;
pub mod patients;
pub mod prescriptions;
pub mod store;
pub mod teleconsultations;

pub use appointments::*;
pub use dashboard::*;
pub use entity::*;
pub use meeting::*;
pub use patients::*;
pub use prescriptions::*;
pub use store::*;
pub use teleconsultations::*;

/// Current calendar day in UTC; row dates and month boundaries all use this calendar
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whether `a` and `b` fall in the same calendar month
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_utc_calendar_day() {
        let before = Utc::now().date_naive();
        let day = today();
        let after = Utc::now().date_naive();
        assert!(day == before || day == after);
    }

    #[test]
    fn test_same_month() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert!(same_month(d(2024, 7, 1), d(2024, 7, 31)));
        assert!(!same_month(d(2024, 6, 30), d(2024, 7, 1)));
        assert!(!same_month(d(2023, 7, 1), d(2024, 7, 1)));
    }
}
