use colored::*;
use records_service::{today, ScheduleRequest, Teleconsultation, TeleconsultationStatus};

use crate::cli::TeleconsultCommand;
use crate::context::AppContext;
use crate::output::{empty, heading, or_dash};

pub async fn run(cmd: TeleconsultCommand, ctx: &AppContext) -> anyhow::Result<()> {
    // Instant rooms need neither a session nor the store
    if let TeleconsultCommand::Instant = cmd {
        println!("{} {}", "Meeting link:".bright_white(), ctx.links.instant().bright_blue().underline());
        return Ok(());
    }

    let mut consultations = ctx.teleconsultations().await?;

    match cmd {
        TeleconsultCommand::List { upcoming } => {
            let rows: Vec<&Teleconsultation> = if upcoming {
                consultations.upcoming(today())
            } else {
                consultations.rows().iter().collect()
            };
            heading("Teleconsultations", rows.len());
            if rows.is_empty() {
                empty("teleconsultations");
            }
            for consultation in rows {
                print_consultation(consultation);
            }
        }
        TeleconsultCommand::Schedule {
            patient,
            date,
            time,
            duration,
        } => {
            let patients = ctx.patients().await?;
            let request = ScheduleRequest {
                duration,
                ..ScheduleRequest::new(patient, date, time)
            };
            let consultation = consultations
                .schedule(request, patients.name_of(patient), &ctx.links)
                .await?;
            print_consultation(&consultation);
        }
        TeleconsultCommand::Status { id, status } => {
            let consultation = consultations
                .set_status(id, TeleconsultationStatus::from(status.trim().to_lowercase()))
                .await?;
            print_consultation(&consultation);
        }
        TeleconsultCommand::Delete { id } => consultations.delete(id).await?,
        TeleconsultCommand::Instant => {}
    }
    Ok(())
}

fn print_consultation(consultation: &Teleconsultation) {
    println!(
        "  {}  {} {}  {:>3} min  {:<22} {:<10} {}",
        consultation.id,
        consultation.date,
        consultation.time.format("%H:%M"),
        consultation.duration,
        or_dash(consultation.patient_name()),
        consultation.status,
        consultation.meeting_url.bright_blue()
    );
}
