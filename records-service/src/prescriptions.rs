use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use database_layer::{tables, Order, Select};
use error_common::ClinicResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{require_text, Entity, InsertPosition, Messages};
use crate::patients::PatientSummary;
use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrescriptionStatus::Active => "active",
            PrescriptionStatus::Completed => "completed",
            PrescriptionStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub doctor_id: String,
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: Option<String>,
    pub prescribed_date: NaiveDate,
    #[serde(default)]
    pub status: PrescriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub patients: Option<PatientSummary>,
}

impl Prescription {
    pub fn patient_name(&self) -> Option<&str> {
        self.patients.as_ref().map(|p| p.full_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionDraft {
    pub patient_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Uuid>,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub prescribed_date: NaiveDate,
    pub status: PrescriptionStatus,
}

impl PrescriptionDraft {
    /// Active prescription dated today
    pub fn new(patient_id: Uuid, medication_name: &str, dosage: &str, frequency: &str, duration: &str) -> Self {
        Self {
            patient_id,
            appointment_id: None,
            medication_name: medication_name.to_string(),
            dosage: dosage.to_string(),
            frequency: frequency.to_string(),
            duration: duration.to_string(),
            instructions: None,
            prescribed_date: crate::today(),
            status: PrescriptionStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PrescriptionStatus>,
}

impl Entity for Prescription {
    type Draft = PrescriptionDraft;
    type Changes = PrescriptionChanges;

    const TABLE: &'static str = tables::PRESCRIPTIONS;
    const NAME: &'static str = "prescription";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch prescriptions",
        added: "Prescription created successfully",
        add_failed: "Failed to create prescription",
        updated: "Prescription updated successfully",
        update_failed: "Failed to update prescription",
        deleted: "Prescription deleted successfully",
        delete_failed: "Failed to delete prescription",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn select() -> Select {
        Select::all().embed(PatientSummary::embed())
    }

    fn ordering() -> Vec<Order> {
        vec![Order::desc("prescribed_date")]
    }

    fn validate_draft(draft: &PrescriptionDraft) -> ClinicResult<()> {
        require_text("medication_name", &draft.medication_name)?;
        require_text("dosage", &draft.dosage)?;
        require_text("frequency", &draft.frequency)?;
        require_text("duration", &draft.duration)
    }
}

pub type PrescriptionStore = EntityStore<Prescription>;

impl EntityStore<Prescription> {
    pub async fn complete(&mut self, id: Uuid) -> ClinicResult<Prescription> {
        self.set_status(id, PrescriptionStatus::Completed).await
    }

    pub async fn cancel(&mut self, id: Uuid) -> ClinicResult<Prescription> {
        self.set_status(id, PrescriptionStatus::Cancelled).await
    }

    pub async fn set_status(&mut self, id: Uuid, status: PrescriptionStatus) -> ClinicResult<Prescription> {
        let changes = PrescriptionChanges {
            status: Some(status),
            ..Default::default()
        };
        self.update(id, changes).await
    }

    /// Prescriptions whose patient name or medication contains `term`, ignoring case
    pub fn search(&self, term: &str) -> Vec<&Prescription> {
        let term = term.trim().to_lowercase();
        self.rows()
            .iter()
            .filter(|p| {
                term.is_empty()
                    || p.medication_name.to_lowercase().contains(&term)
                    || p
                        .patient_name()
                        .is_some_and(|name| name.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Number of prescriptions dated in the month of `day`
    pub fn count_in_month(&self, day: NaiveDate) -> usize {
        self.rows()
            .iter()
            .filter(|p| crate::same_month(p.prescribed_date, day))
            .count()
    }
}
