use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use database_layer::{tables, Order, Select};
use error_common::ClinicResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Entity, InsertPosition, Messages};
use crate::meeting::MeetingLinks;
use crate::patients::PatientSummary;
use crate::store::EntityStore;

/// Default length of a scheduled consultation, in minutes
pub const DEFAULT_DURATION: i32 = 30;

/// Free-text status column; unknown values are kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeleconsultationStatus {
    #[default]
    Scheduled,
    Waiting,
    Completed,
    Cancelled,
    Other(String),
}

impl From<String> for TeleconsultationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "scheduled" => TeleconsultationStatus::Scheduled,
            "waiting" => TeleconsultationStatus::Waiting,
            "completed" => TeleconsultationStatus::Completed,
            "cancelled" => TeleconsultationStatus::Cancelled,
            _ => TeleconsultationStatus::Other(value),
        }
    }
}

impl From<TeleconsultationStatus> for String {
    fn from(status: TeleconsultationStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for TeleconsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeleconsultationStatus::Scheduled => f.write_str("scheduled"),
            TeleconsultationStatus::Waiting => f.write_str("waiting"),
            TeleconsultationStatus::Completed => f.write_str("completed"),
            TeleconsultationStatus::Cancelled => f.write_str("cancelled"),
            TeleconsultationStatus::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teleconsultation {
    pub id: Uuid,
    pub doctor_id: String,
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: i32,
    pub meeting_url: String,
    #[serde(default)]
    pub status: TeleconsultationStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub patients: Option<PatientSummary>,
}

impl Teleconsultation {
    pub fn patient_name(&self) -> Option<&str> {
        self.patients.as_ref().map(|p| p.full_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeleconsultationDraft {
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: i32,
    pub meeting_url: String,
    pub status: TeleconsultationStatus,
}

/// A consultation slot before its meeting room exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration: i32,
}

impl ScheduleRequest {
    pub fn new(patient_id: Uuid, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            patient_id,
            date,
            time,
            duration: DEFAULT_DURATION,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeleconsultationChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TeleconsultationStatus>,
}

impl Entity for Teleconsultation {
    type Draft = TeleconsultationDraft;
    type Changes = TeleconsultationChanges;

    const TABLE: &'static str = tables::TELECONSULTATIONS;
    const NAME: &'static str = "teleconsultation";
    const INSERT_POSITION: InsertPosition = InsertPosition::Append;
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch teleconsultations",
        added: "Teleconsultation scheduled successfully",
        add_failed: "Failed to schedule teleconsultation",
        updated: "Teleconsultation updated successfully",
        update_failed: "Failed to update teleconsultation",
        deleted: "Teleconsultation cancelled successfully",
        delete_failed: "Failed to cancel teleconsultation",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn select() -> Select {
        Select::all().embed(PatientSummary::embed())
    }

    fn ordering() -> Vec<Order> {
        vec![Order::asc("date"), Order::asc("time")]
    }

    fn validate_draft(draft: &TeleconsultationDraft) -> ClinicResult<()> {
        if draft.duration <= 0 {
            return Err(error_common::ClinicError::ValidationError(
                "duration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub type TeleconsultationStore = EntityStore<Teleconsultation>;

impl EntityStore<Teleconsultation> {
    /// Schedule a consultation with a room named after the patient
    pub async fn schedule(
        &mut self,
        request: ScheduleRequest,
        patient_name: Option<&str>,
        links: &MeetingLinks,
    ) -> ClinicResult<Teleconsultation> {
        let draft = TeleconsultationDraft {
            patient_id: request.patient_id,
            date: request.date,
            time: request.time,
            duration: request.duration,
            meeting_url: links.room_for(patient_name),
            status: TeleconsultationStatus::Scheduled,
        };
        self.add(draft).await
    }

    pub async fn set_status(&mut self, id: Uuid, status: TeleconsultationStatus) -> ClinicResult<Teleconsultation> {
        let changes = TeleconsultationChanges {
            status: Some(status),
            ..Default::default()
        };
        self.update(id, changes).await
    }

    /// Consultations from `today` onwards that are not finished
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&Teleconsultation> {
        self.rows()
            .iter()
            .filter(|t| {
                t.date >= today
                    && !matches!(
                        t.status,
                        TeleconsultationStatus::Completed | TeleconsultationStatus::Cancelled
                    )
            })
            .collect()
    }
}
