use chrono::NaiveDate;
use records_service::same_month;
use rust_decimal::Decimal;

use crate::models::{Bill, BillStatus};

/// Revenue figures over the practitioner's bills
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RevenueReport {
    /// Every bill regardless of status
    pub total_billed: Decimal,
    pub collected: Decimal,
    pub pending: Decimal,
    pub overdue: Decimal,
    /// Paid bills created in the reporting month
    pub monthly_revenue: Decimal,
}

impl RevenueReport {
    pub fn compute(bills: &[Bill], today: NaiveDate) -> Self {
        let sum_status = |status: BillStatus| -> Decimal {
            bills
                .iter()
                .filter(|b| b.status == status)
                .map(|b| b.amount)
                .sum()
        };

        Self {
            total_billed: bills.iter().map(|b| b.amount).sum(),
            collected: sum_status(BillStatus::Paid),
            pending: sum_status(BillStatus::Pending),
            overdue: sum_status(BillStatus::Overdue),
            monthly_revenue: monthly_revenue(bills, today),
        }
    }
}

/// Sum of paid bills whose `created_at` falls in the month of `today`
pub fn monthly_revenue(bills: &[Bill], today: NaiveDate) -> Decimal {
    bills
        .iter()
        .filter(|b| b.status == BillStatus::Paid && same_month(b.created_at.date_naive(), today))
        .map(|b| b.amount)
        .sum()
}
