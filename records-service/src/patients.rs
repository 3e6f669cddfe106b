use chrono::{DateTime, NaiveDate, Utc};
use database_layer::{tables, Embed, Order, Select};
use error_common::ClinicResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{require_text, Entity, InsertPosition, Messages};
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub doctor_id: String,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display fields of a patient embedded in other rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl PatientSummary {
    /// `patients(id,full_name,phone,email)` through `patient_id`
    pub fn embed() -> Embed {
        Embed::new(tables::PATIENTS, "patient_id", &["id", "full_name", "phone", "email"])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub full_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
}

impl PatientDraft {
    pub fn new(full_name: &str, phone: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
}

impl Entity for Patient {
    type Draft = PatientDraft;
    type Changes = PatientChanges;

    const TABLE: &'static str = tables::PATIENTS;
    const NAME: &'static str = "patient";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch patients",
        added: "Patient added successfully",
        add_failed: "Failed to add patient",
        updated: "Patient updated successfully",
        update_failed: "Failed to update patient",
        deleted: "Patient deleted successfully",
        delete_failed: "Failed to delete patient",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn select() -> Select {
        Select::all()
    }

    fn ordering() -> Vec<Order> {
        vec![Order::desc("created_at")]
    }

    fn validate_draft(draft: &PatientDraft) -> ClinicResult<()> {
        require_text("full_name", &draft.full_name)?;
        require_text("phone", &draft.phone)
    }
}

pub type PatientStore = EntityStore<Patient>;

impl EntityStore<Patient> {
    /// Patients whose name or phone contains `term`, ignoring case
    pub fn search(&self, term: &str) -> Vec<&Patient> {
        let term = term.trim().to_lowercase();
        self.rows()
            .iter()
            .filter(|p| {
                term.is_empty()
                    || p.full_name.to_lowercase().contains(&term)
                    || p.phone.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn name_of(&self, id: Uuid) -> Option<&str> {
        self.find(id).map(|p| p.full_name.as_str())
    }
}
