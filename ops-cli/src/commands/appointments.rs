use colored::*;
use records_service::{Appointment, AppointmentDraft};

use crate::cli::AppointmentCommand;
use crate::context::AppContext;
use crate::output::{empty, heading, or_dash};

pub async fn run(cmd: AppointmentCommand, ctx: &AppContext) -> anyhow::Result<()> {
    let mut appointments = ctx.appointments().await?;

    match cmd {
        AppointmentCommand::List { date } => {
            let rows: Vec<&Appointment> = match date {
                Some(day) => appointments.on_date(day),
                None => appointments.rows().iter().collect(),
            };
            heading("Appointments", rows.len());
            if rows.is_empty() {
                empty("appointments");
            }
            for appointment in rows {
                print_appointment(appointment);
            }
        }
        AppointmentCommand::Add {
            patient,
            date,
            time,
            duration,
            kind,
            notes,
        } => {
            let draft = AppointmentDraft {
                duration_minutes: duration,
                kind: kind.into(),
                notes,
                ..AppointmentDraft::new(patient, date, time)
            };
            let appointment = appointments.add(draft).await?;
            print_appointment(&appointment);
        }
        AppointmentCommand::Reschedule { id, date, time } => {
            let appointment = appointments.reschedule(id, date, time).await?;
            print_appointment(&appointment);
        }
        AppointmentCommand::Status { id, status } => {
            let appointment = appointments.set_status(id, status.into()).await?;
            print_appointment(&appointment);
        }
        AppointmentCommand::Join { id } => {
            let url = appointments.join(id, &ctx.links).await?;
            println!("{} {}", "Meeting link:".bright_white(), url.bright_blue().underline());
        }
        AppointmentCommand::Start { id } => {
            let url = appointments.start(id, &ctx.links).await?;
            println!("{} {}", "Consultation started:".bright_white(), url.bright_blue().underline());
        }
        AppointmentCommand::Delete { id } => appointments.delete(id).await?,
    }
    Ok(())
}

fn print_appointment(appointment: &Appointment) {
    println!(
        "  {}  {} {}  {:<22} {:<12} {}",
        appointment.id,
        appointment.appointment_date,
        appointment.appointment_time.format("%H:%M"),
        or_dash(appointment.patient_name()),
        appointment.kind,
        appointment.status
    );
}
