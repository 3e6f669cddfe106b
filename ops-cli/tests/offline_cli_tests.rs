use std::sync::Arc;

use billing_service::BillStatus;
use clap::Parser;
use config_engine::ClinicConfig;
use error_common::RecordingNotifier;
use ops_cli::{commands, AppContext, Cli};
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> ClinicConfig {
    let mut config = ClinicConfig::default();
    config.identity.session_file = dir.path().join("session.json");
    config.documents.output_dir = dir.path().join("documents");
    config
}

fn offline(config: &ClinicConfig) -> (AppContext, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = AppContext::offline(config.clone(), notifier.clone()).unwrap();
    (ctx, notifier)
}

async fn exec(ctx: &AppContext, args: &[&str]) -> anyhow::Result<()> {
    let argv = ["clinicdesk", "--offline"].iter().chain(args.iter());
    let cli = Cli::try_parse_from(argv).unwrap();
    commands::run(cli.command, ctx).await
}

#[tokio::test]
async fn test_commands_require_sign_in() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, _) = offline(&config_in(&dir));

    let err = exec(&ctx, &["patients", "list"]).await.unwrap_err();
    assert!(format!("{err:#}").contains("auth sign-in"));
}

#[tokio::test]
async fn test_offline_session_and_records_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let (ctx, notifier) = offline(&config);
    exec(&ctx, &["auth", "sign-in"]).await.unwrap();
    exec(&ctx, &["patients", "add", "--name", "Asha Rao", "--phone", "9876543210"])
        .await
        .unwrap();
    assert_eq!(
        notifier.last().map(|n| n.description),
        Some("Patient added successfully".to_string())
    );
    ctx.persist().unwrap();

    let (ctx, _) = offline(&config);
    let patients = ctx.patients().await.unwrap();
    assert_eq!(patients.rows().len(), 1);
    assert_eq!(patients.rows()[0].full_name, "Asha Rao");
    assert_eq!(patients.rows()[0].doctor_id, "user_offline");
}

#[tokio::test]
async fn test_billing_flow_and_invoice_export() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, notifier) = offline(&config_in(&dir));

    exec(&ctx, &["auth", "sign-in"]).await.unwrap();
    exec(&ctx, &["patients", "add", "--name", "Asha Rao", "--phone", "9876543210"])
        .await
        .unwrap();
    let patient_id = ctx.patients().await.unwrap().rows()[0].id.to_string();

    exec(
        &ctx,
        &[
            "billing", "create", "--patient", &patient_id, "--amount", "1500.50", "--due",
            "2024-03-15", "--invoice", "INV-77", "--description", "Consultation",
        ],
    )
    .await
    .unwrap();

    let bill_id = ctx.billing().await.unwrap().bills()[0].id.to_string();
    exec(&ctx, &["billing", "mark-paid", &bill_id]).await.unwrap();
    let paid = ctx.billing().await.unwrap().bills()[0].clone();
    assert_eq!(paid.status, BillStatus::Paid);
    assert_eq!(paid.paid_date, Some(records_service::today()));

    // A second payment is refused
    assert!(exec(&ctx, &["billing", "mark-paid", &bill_id]).await.is_err());

    exec(&ctx, &["billing", "export", &bill_id]).await.unwrap();
    let pdf = std::fs::read(dir.path().join("documents").join("invoice-INV-77.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert!(!notifier.has_failure());
}

#[tokio::test]
async fn test_appointment_start_sets_meeting_link() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, _) = offline(&config_in(&dir));

    exec(&ctx, &["auth", "sign-in"]).await.unwrap();
    exec(&ctx, &["patients", "add", "--name", "Asha Rao", "--phone", "9876543210"])
        .await
        .unwrap();
    let patient_id = ctx.patients().await.unwrap().rows()[0].id.to_string();

    exec(
        &ctx,
        &["appointments", "add", "--patient", &patient_id, "--date", "2030-01-10", "--time", "09:30"],
    )
    .await
    .unwrap();
    let appointment_id = ctx.appointments().await.unwrap().rows()[0].id.to_string();

    exec(&ctx, &["appointments", "start", &appointment_id]).await.unwrap();

    let appointments = ctx.appointments().await.unwrap();
    let appointment = &appointments.rows()[0];
    assert_eq!(appointment.status, records_service::AppointmentStatus::InProgress);
    assert!(appointment
        .meeting_url
        .as_deref()
        .is_some_and(|url| url.contains("asha-rao")));
}

#[tokio::test]
async fn test_sign_out() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, _) = offline(&config_in(&dir));

    exec(&ctx, &["auth", "sign-in"]).await.unwrap();
    assert!(ctx.session().await.is_ok());

    exec(&ctx, &["auth", "sign-out"]).await.unwrap();
    assert!(ctx.session().await.is_err());
}

#[tokio::test]
async fn test_status_reports_offline_backend() {
    let dir = tempfile::tempdir().unwrap();
    let (ctx, _) = offline(&config_in(&dir));

    exec(&ctx, &["status"]).await.unwrap();
    exec(&ctx, &["auth", "sign-in"]).await.unwrap();
    exec(&ctx, &["status"]).await.unwrap();
}
