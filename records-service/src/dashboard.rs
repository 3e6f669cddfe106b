use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::appointments::Appointment;
use crate::patients::Patient;
use crate::prescriptions::Prescription;
use crate::same_month;

/// Appointments shown on the dashboard
pub const RECENT_APPOINTMENTS: usize = 3;

/// Figures for the practitioner's landing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub today: NaiveDate,
    pub todays_appointments: usize,
    pub total_patients: usize,
    pub monthly_prescriptions: usize,
    /// Sum of paid bills created this month
    pub monthly_revenue: Decimal,
    pub recent_appointments: Vec<Appointment>,
}

impl DashboardStats {
    /// `appointments` are expected in store order, so the first of today's are the earliest
    pub fn compute(
        today: NaiveDate,
        appointments: &[Appointment],
        patients: &[Patient],
        prescriptions: &[Prescription],
        monthly_revenue: Decimal,
    ) -> Self {
        let todays: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| a.appointment_date == today)
            .collect();

        Self {
            today,
            todays_appointments: todays.len(),
            total_patients: patients.len(),
            monthly_prescriptions: prescriptions
                .iter()
                .filter(|p| same_month(p.prescribed_date, today))
                .count(),
            monthly_revenue,
            recent_appointments: todays
                .into_iter()
                .take(RECENT_APPOINTMENTS)
                .cloned()
                .collect(),
        }
    }
}
