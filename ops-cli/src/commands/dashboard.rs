use colored::*;
use records_service::{today, DashboardStats};

use crate::context::AppContext;
use crate::output::{field, or_dash};

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let session = ctx.session().await?;
    let day = today();

    let appointments = ctx.appointments().await?;
    let patients = ctx.patients().await?;
    let prescriptions = ctx.prescriptions().await?;
    let billing = ctx.billing().await?;

    let stats = DashboardStats::compute(
        day,
        appointments.rows(),
        patients.rows(),
        prescriptions.rows(),
        billing_service::monthly_revenue(billing.bills(), day),
    );

    println!(
        "{} {}",
        "Welcome back,".bright_cyan(),
        session.user.display_name().bold()
    );
    field("Today", stats.today);
    field("Today's appointments", stats.todays_appointments);
    field("Total patients", stats.total_patients);
    field("Prescriptions this month", stats.monthly_prescriptions);
    field(
        "Revenue this month",
        format!("{}{:.2}", ctx.config.documents.currency_symbol, stats.monthly_revenue),
    );

    if stats.recent_appointments.is_empty() {
        println!("  {}", "No appointments today".dimmed());
    }
    for appointment in &stats.recent_appointments {
        println!(
            "  {} {:<22} {}",
            appointment.appointment_time.format("%H:%M"),
            or_dash(appointment.patient_name()),
            appointment.status
        );
    }
    Ok(())
}
