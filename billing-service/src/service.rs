use std::sync::Arc;

use chrono::NaiveDate;
use database_layer::{PractitionerId, RemoteStore};
use error_common::{ClinicError, Notifier};
use records_service::EntityStore;
use tracing::info;
use uuid::Uuid;

use crate::error::{BillingError, BillingResult};
use crate::models::{Bill, BillChanges, BillDraft, BillStatus};
use crate::reporting::RevenueReport;

/// The practitioner's bills, newest first
pub struct BillingService {
    bills: EntityStore<Bill>,
}

impl BillingService {
    /// Create a new billing service
    pub fn new(remote: Arc<dyn RemoteStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            bills: EntityStore::new(remote, notifier),
        }
    }

    pub async fn attach(&mut self, practitioner: PractitionerId) -> BillingResult<()> {
        Ok(self.bills.attach(practitioner).await?)
    }

    pub async fn fetch(&mut self) -> BillingResult<()> {
        Ok(self.bills.fetch().await?)
    }

    pub fn bills(&self) -> &[Bill] {
        self.bills.rows()
    }

    pub fn loading(&self) -> bool {
        self.bills.loading()
    }

    pub fn find(&self, id: Uuid) -> Option<&Bill> {
        self.bills.find(id)
    }

    pub fn find_by_invoice(&self, invoice_number: &str) -> Option<&Bill> {
        self.bills
            .rows()
            .iter()
            .find(|b| b.invoice_number == invoice_number)
    }

    /// Create a bill
    pub async fn create(&mut self, draft: BillDraft) -> BillingResult<Bill> {
        Ok(self.bills.add(draft).await?)
    }

    pub async fn update(&mut self, id: Uuid, changes: BillChanges) -> BillingResult<Bill> {
        Ok(self.bills.update(id, changes).await?)
    }

    pub async fn delete(&mut self, id: Uuid) -> BillingResult<()> {
        Ok(self.bills.delete(id).await?)
    }

    /// Record payment of a pending or overdue bill on `paid_on`
    pub async fn mark_paid(&mut self, id: Uuid, paid_on: NaiveDate) -> BillingResult<Bill> {
        let bill = self
            .bills
            .find(id)
            .ok_or_else(|| ClinicError::NotFound(format!("bill {id}")))?;

        match bill.status {
            BillStatus::Paid => return Err(BillingError::AlreadyPaid(bill.invoice_number.clone())),
            BillStatus::Cancelled => {
                return Err(BillingError::NotPayable {
                    invoice: bill.invoice_number.clone(),
                    status: bill.status.to_string(),
                })
            }
            BillStatus::Pending | BillStatus::Overdue => {}
        }

        let changes = BillChanges {
            status: Some(BillStatus::Paid),
            paid_date: Some(paid_on),
            ..Default::default()
        };
        let paid = self.bills.update(id, changes).await?;
        info!(invoice = %paid.invoice_number, "Invoice marked as paid");
        Ok(paid)
    }

    /// Bills whose patient name, description or invoice number contains `term`, ignoring case
    pub fn search(&self, term: &str) -> Vec<&Bill> {
        let term = term.trim().to_lowercase();
        let contains = |value: Option<&str>| value.is_some_and(|v| v.to_lowercase().contains(&term));

        self.bills
            .rows()
            .iter()
            .filter(|b| {
                term.is_empty()
                    || contains(b.patient_name())
                    || contains(b.description.as_deref())
                    || contains(Some(b.invoice_number.as_str()))
            })
            .collect()
    }

    pub fn report(&self, today: NaiveDate) -> RevenueReport {
        RevenueReport::compute(self.bills.rows(), today)
    }
}

impl std::fmt::Debug for BillingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingService").field("bills", &self.bills).finish()
    }
}
