use colored::*;
use records_service::{Prescription, PrescriptionDraft};

use crate::cli::PrescriptionCommand;
use crate::context::AppContext;
use crate::output::{empty, heading, or_dash};

pub async fn run(cmd: PrescriptionCommand, ctx: &AppContext) -> anyhow::Result<()> {
    let mut prescriptions = ctx.prescriptions().await?;

    match cmd {
        PrescriptionCommand::List { search } => {
            let rows = prescriptions.search(search.as_deref().unwrap_or_default());
            heading("Prescriptions", rows.len());
            if rows.is_empty() {
                empty("prescriptions");
            }
            for prescription in rows {
                print_prescription(prescription);
            }
        }
        PrescriptionCommand::Add {
            patient,
            medication,
            dosage,
            frequency,
            duration,
            instructions,
            appointment,
        } => {
            let draft = PrescriptionDraft {
                instructions,
                appointment_id: appointment,
                ..PrescriptionDraft::new(patient, &medication, &dosage, &frequency, &duration)
            };
            let prescription = prescriptions.add(draft).await?;
            print_prescription(&prescription);
        }
        PrescriptionCommand::Complete { id } => {
            let prescription = prescriptions.complete(id).await?;
            print_prescription(&prescription);
        }
        PrescriptionCommand::Cancel { id } => {
            let prescription = prescriptions.cancel(id).await?;
            print_prescription(&prescription);
        }
        PrescriptionCommand::Delete { id } => prescriptions.delete(id).await?,
        PrescriptionCommand::Export { id } => {
            let prescription = prescriptions
                .find(id)
                .ok_or_else(|| anyhow::anyhow!("prescription {id} not found"))?;
            let prescriber = ctx.session().await?.user.display_name();
            let path = document_service::export_prescription(prescription, &prescriber, &ctx.config.documents)?;
            println!("{} {}", "Prescription saved to".bright_green(), path.display());
        }
    }
    Ok(())
}

fn print_prescription(prescription: &Prescription) {
    println!(
        "  {}  {}  {:<22} {} {} ({}, {})  {}",
        prescription.id,
        prescription.prescribed_date,
        or_dash(prescription.patient_name()),
        prescription.medication_name,
        prescription.dosage,
        prescription.frequency,
        prescription.duration,
        prescription.status
    );
}
