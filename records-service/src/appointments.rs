use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use database_layer::{tables, Embed, Order, Select};
use error_common::ClinicResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Entity, InsertPosition, Messages};
use crate::meeting::MeetingLinks;
use crate::patients::PatientSummary;
use crate::store::EntityStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    #[default]
    Pending,
    Cancelled,
    Completed,
    /// Set when a video consultation is started
    InProgress,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::InProgress => "in_progress",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    #[default]
    Consultation,
    Followup,
    Checkup,
    Emergency,
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentType::Consultation => "consultation",
            AppointmentType::Followup => "followup",
            AppointmentType::Checkup => "checkup",
            AppointmentType::Emergency => "emergency",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: String,
    pub patient_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub duration_minutes: Option<i32>,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    #[serde(default)]
    pub meeting_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub patients: Option<PatientSummary>,
}

impl Appointment {
    pub fn patient_name(&self) -> Option<&str> {
        self.patients.as_ref().map(|p| p.full_name.as_str())
    }
}

/// Display fields of an appointment embedded in other rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
}

impl AppointmentSummary {
    /// `appointments(id,appointment_date,appointment_time,type)` through `appointment_id`
    pub fn embed() -> Embed {
        Embed::new(
            tables::APPOINTMENTS,
            "appointment_id",
            &["id", "appointment_date", "appointment_time", "type"],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub patient_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentDraft {
    pub fn new(patient_id: Uuid, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            patient_id,
            appointment_date: date,
            appointment_time: time,
            duration_minutes: None,
            kind: AppointmentType::default(),
            status: AppointmentStatus::default(),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AppointmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
}

impl Entity for Appointment {
    type Draft = AppointmentDraft;
    type Changes = AppointmentChanges;

    const TABLE: &'static str = tables::APPOINTMENTS;
    const NAME: &'static str = "appointment";
    const INSERT_POSITION: InsertPosition = InsertPosition::Append;
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch appointments",
        added: "Appointment scheduled successfully",
        add_failed: "Failed to schedule appointment",
        updated: "Appointment updated successfully",
        update_failed: "Failed to update appointment",
        deleted: "Appointment cancelled successfully",
        delete_failed: "Failed to cancel appointment",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn select() -> Select {
        Select::all().embed(PatientSummary::embed())
    }

    fn ordering() -> Vec<Order> {
        vec![Order::asc("appointment_date"), Order::asc("appointment_time")]
    }
}

pub type AppointmentStore = EntityStore<Appointment>;

impl EntityStore<Appointment> {
    /// Appointments on `date`, in time order
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        self.rows()
            .iter()
            .filter(|a| a.appointment_date == date)
            .collect()
    }

    /// Move to a new slot; a rescheduled appointment is confirmed again
    pub async fn reschedule(&mut self, id: Uuid, date: NaiveDate, time: NaiveTime) -> ClinicResult<Appointment> {
        let changes = AppointmentChanges {
            appointment_date: Some(date),
            appointment_time: Some(time),
            status: Some(AppointmentStatus::Confirmed),
            ..Default::default()
        };
        self.update(id, changes).await
    }

    pub async fn set_status(&mut self, id: Uuid, status: AppointmentStatus) -> ClinicResult<Appointment> {
        let changes = AppointmentChanges {
            status: Some(status),
            ..Default::default()
        };
        self.update(id, changes).await
    }

    /// Meeting URL of the appointment, generating and storing one if missing
    pub async fn join(&mut self, id: Uuid, links: &MeetingLinks) -> ClinicResult<String> {
        let appointment = self.require(id)?;
        if let Some(url) = appointment.meeting_url.clone().filter(|u| !u.is_empty()) {
            return Ok(url);
        }

        let url = links.room_for(appointment.patient_name());
        let changes = AppointmentChanges {
            meeting_url: Some(url.clone()),
            ..Default::default()
        };
        self.update(id, changes).await?;
        Ok(url)
    }

    /// Ensure a meeting URL and mark the consultation as in progress
    pub async fn start(&mut self, id: Uuid, links: &MeetingLinks) -> ClinicResult<String> {
        let appointment = self.require(id)?;
        let url = appointment
            .meeting_url
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| links.room_for(appointment.patient_name()));

        let changes = AppointmentChanges {
            meeting_url: Some(url.clone()),
            status: Some(AppointmentStatus::InProgress),
            ..Default::default()
        };
        self.update(id, changes).await?;
        Ok(url)
    }
}
