use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use database_layer::{tables, Order, Select};
use error_common::{ClinicError, ClinicResult};
use records_service::{AppointmentSummary, Entity, InsertPosition, Messages, PatientSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice number used when none is supplied: `INV-<unix millis>`
pub fn default_invoice_number() -> String {
    format!("INV-{}", Utc::now().timestamp_millis())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
            BillStatus::Overdue => "overdue",
            BillStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Row of the `billing` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub doctor_id: String,
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub invoice_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub patients: Option<PatientSummary>,
    #[serde(default)]
    pub appointments: Option<AppointmentSummary>,
}

impl Bill {
    pub fn patient_name(&self) -> Option<&str> {
        self.patients.as_ref().map(|p| p.full_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillDraft {
    pub patient_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Uuid>,
    pub invoice_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub status: BillStatus,
}

impl BillDraft {
    /// Pending bill with a generated invoice number
    pub fn new(patient_id: Uuid, amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            patient_id,
            appointment_id: None,
            invoice_number: default_invoice_number(),
            amount,
            description: None,
            due_date,
            status: BillStatus::Pending,
        }
    }

    /// Use `number` unless it is blank
    pub fn with_invoice_number(mut self, number: Option<&str>) -> Self {
        if let Some(number) = number.map(str::trim).filter(|n| !n.is_empty()) {
            self.invoice_number = number.to_string();
        }
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BillChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BillStatus>,
}

impl Entity for Bill {
    type Draft = BillDraft;
    type Changes = BillChanges;

    const TABLE: &'static str = tables::BILLING;
    const NAME: &'static str = "bill";
    const INSERT_POSITION: InsertPosition = InsertPosition::Prepend;
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch bills",
        added: "Bill created successfully",
        add_failed: "Failed to create bill",
        updated: "Bill updated successfully",
        update_failed: "Failed to update bill",
        deleted: "Bill deleted successfully",
        delete_failed: "Failed to delete bill",
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn select() -> Select {
        Select::all()
            .embed(PatientSummary::embed())
            .embed(AppointmentSummary::embed())
    }

    fn ordering() -> Vec<Order> {
        vec![Order::desc("created_at")]
    }

    fn validate_draft(draft: &BillDraft) -> ClinicResult<()> {
        if draft.invoice_number.trim().is_empty() {
            return Err(ClinicError::ValidationError("invoice_number is required".to_string()));
        }
        if draft.amount.is_sign_negative() {
            return Err(ClinicError::ValidationError("amount must not be negative".to_string()));
        }
        Ok(())
    }
}
