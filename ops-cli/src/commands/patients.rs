use records_service::{Patient, PatientChanges, PatientDraft};

use crate::cli::{PatientArgs, PatientCommand};
use crate::context::AppContext;
use crate::output::{empty, heading, or_dash};

pub async fn run(cmd: PatientCommand, ctx: &AppContext) -> anyhow::Result<()> {
    let mut patients = ctx.patients().await?;

    match cmd {
        PatientCommand::List { search } => {
            let rows = patients.search(search.as_deref().unwrap_or_default());
            heading("Patients", rows.len());
            if rows.is_empty() {
                empty("patients");
            }
            for patient in rows {
                print_patient(patient);
            }
        }
        PatientCommand::Add(args) => {
            let patient = patients.add(draft(args)).await?;
            print_patient(&patient);
        }
        PatientCommand::Update {
            id,
            name,
            phone,
            email,
            address,
            allergies,
            medical_history,
        } => {
            let changes = PatientChanges {
                full_name: name,
                phone,
                email,
                address,
                allergies,
                medical_history,
                ..Default::default()
            };
            let patient = patients.update(id, changes).await?;
            print_patient(&patient);
        }
        PatientCommand::Delete { id } => patients.delete(id).await?,
    }
    Ok(())
}

fn draft(args: PatientArgs) -> PatientDraft {
    PatientDraft {
        email: args.email,
        date_of_birth: args.date_of_birth,
        gender: args.gender,
        address: args.address,
        emergency_contact: args.emergency_contact,
        emergency_phone: args.emergency_phone,
        medical_history: args.medical_history,
        allergies: args.allergies,
        ..PatientDraft::new(&args.name, &args.phone)
    }
}

fn print_patient(patient: &Patient) {
    println!(
        "  {}  {:<24} {:<14} {}",
        patient.id,
        patient.full_name,
        patient.phone,
        or_dash(patient.email.as_deref())
    );
}
