use std::path::PathBuf;

use billing_service::BillStatus;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use records_service::{AppointmentStatus, AppointmentType};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Clinic management for a single practitioner
#[derive(Parser, Debug)]
#[command(name = "clinicdesk", version)]
#[command(about = "Patients, appointments, prescriptions and billing from the terminal")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CLINICDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep records in a local file instead of the hosted database
    #[arg(long)]
    pub offline: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Practitioner session
    #[command(subcommand)]
    Auth(AuthCommand),
    #[command(subcommand)]
    Patients(PatientCommand),
    #[command(subcommand)]
    Appointments(AppointmentCommand),
    #[command(subcommand)]
    Prescriptions(PrescriptionCommand),
    #[command(subcommand)]
    Billing(BillingCommand),
    /// Video consultations
    #[command(subcommand)]
    Teleconsult(TeleconsultCommand),
    /// Today's figures
    Dashboard,
    /// Backend reachability and the current session
    Status,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Sign in with an identity-provider user id (defaults to the offline user)
    SignIn { user_id: Option<String> },
    SignOut,
    /// Show the signed-in practitioner
    Whoami,
}

#[derive(Subcommand, Debug)]
pub enum PatientCommand {
    List {
        /// Filter by name or phone
        #[arg(short, long)]
        search: Option<String>,
    },
    Add(PatientArgs),
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        allergies: Option<String>,
        #[arg(long)]
        medical_history: Option<String>,
    },
    Delete { id: Uuid },
}

#[derive(Args, Debug)]
pub struct PatientArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub emergency_contact: Option<String>,
    #[arg(long)]
    pub emergency_phone: Option<String>,
    #[arg(long)]
    pub medical_history: Option<String>,
    #[arg(long)]
    pub allergies: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AppointmentCommand {
    List {
        /// Only appointments on this day
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Add {
        #[arg(long)]
        patient: Uuid,
        #[arg(long)]
        date: NaiveDate,
        /// HH:MM
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
        #[arg(long)]
        duration: Option<i32>,
        #[arg(long, value_enum, default_value_t = KindArg::Consultation)]
        kind: KindArg,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Move to a new slot; the appointment becomes confirmed
    Reschedule {
        id: Uuid,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
    },
    Status {
        id: Uuid,
        #[arg(value_enum)]
        status: AppointmentStatusArg,
    },
    /// Print the appointment's meeting link, creating it on first use
    Join { id: Uuid },
    /// Open the meeting and mark the appointment in progress
    Start { id: Uuid },
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum PrescriptionCommand {
    List {
        /// Filter by medication or patient name
        #[arg(short, long)]
        search: Option<String>,
    },
    Add {
        #[arg(long)]
        patient: Uuid,
        #[arg(long)]
        medication: String,
        #[arg(long)]
        dosage: String,
        #[arg(long)]
        frequency: String,
        #[arg(long)]
        duration: String,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        appointment: Option<Uuid>,
    },
    Complete { id: Uuid },
    Cancel { id: Uuid },
    Delete { id: Uuid },
    /// Write the prescription as PDF
    Export { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum BillingCommand {
    List {
        /// Filter by patient, description or invoice number
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        status: Option<BillStatusArg>,
    },
    Create {
        #[arg(long)]
        patient: Uuid,
        #[arg(long)]
        amount: Decimal,
        /// YYYY-MM-DD
        #[arg(long)]
        due: NaiveDate,
        /// Defaults to INV-<timestamp>
        #[arg(long)]
        invoice: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        appointment: Option<Uuid>,
    },
    MarkPaid { id: Uuid },
    Delete { id: Uuid },
    /// Write the invoice as PDF
    Export { id: Uuid },
    Report,
}

#[derive(Subcommand, Debug)]
pub enum TeleconsultCommand {
    List {
        /// Only consultations from today that are not finished
        #[arg(long)]
        upcoming: bool,
    },
    Schedule {
        #[arg(long)]
        patient: Uuid,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
        /// Minutes
        #[arg(long, default_value_t = records_service::DEFAULT_DURATION)]
        duration: i32,
    },
    /// Print a fresh meeting room link
    Instant,
    /// Set a status such as scheduled, waiting, completed or cancelled
    Status { id: Uuid, status: String },
    Delete { id: Uuid },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Consultation,
    Followup,
    Checkup,
    Emergency,
}

impl From<KindArg> for AppointmentType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Consultation => AppointmentType::Consultation,
            KindArg::Followup => AppointmentType::Followup,
            KindArg::Checkup => AppointmentType::Checkup,
            KindArg::Emergency => AppointmentType::Emergency,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatusArg {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl From<AppointmentStatusArg> for AppointmentStatus {
    fn from(status: AppointmentStatusArg) -> Self {
        match status {
            AppointmentStatusArg::Pending => AppointmentStatus::Pending,
            AppointmentStatusArg::Confirmed => AppointmentStatus::Confirmed,
            AppointmentStatusArg::InProgress => AppointmentStatus::InProgress,
            AppointmentStatusArg::Completed => AppointmentStatus::Completed,
            AppointmentStatusArg::Cancelled => AppointmentStatus::Cancelled,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatusArg {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl From<BillStatusArg> for BillStatus {
    fn from(status: BillStatusArg) -> Self {
        match status {
            BillStatusArg::Pending => BillStatus::Pending,
            BillStatusArg::Paid => BillStatus::Paid,
            BillStatusArg::Overdue => BillStatus::Overdue,
            BillStatusArg::Cancelled => BillStatus::Cancelled,
        }
    }
}

/// Accepts `HH:MM` or `HH:MM:SS`
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{value}', expected HH:MM"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:30"), Ok(NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
        assert_eq!(parse_time("14:05:10"), Ok(NaiveTime::from_hms_opt(14, 5, 10).unwrap()));
        assert!(parse_time("9.30").is_err());
    }

    #[test]
    fn test_parse_billing_create() {
        let cli = Cli::try_parse_from([
            "clinicdesk",
            "--offline",
            "billing",
            "create",
            "--patient",
            "6f1c2b8e-3d4a-4e5f-9a6b-7c8d9e0f1a2b",
            "--amount",
            "1500.50",
            "--due",
            "2024-03-15",
        ])
        .unwrap();

        assert!(cli.offline);
        match cli.command {
            Command::Billing(BillingCommand::Create { amount, due, invoice, .. }) => {
                assert_eq!(amount.to_string(), "1500.50");
                assert_eq!(due, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
                assert!(invoice.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_appointment_status() {
        let cli = Cli::try_parse_from([
            "clinicdesk",
            "appointments",
            "status",
            "6f1c2b8e-3d4a-4e5f-9a6b-7c8d9e0f1a2b",
            "in-progress",
        ])
        .unwrap();

        match cli.command {
            Command::Appointments(AppointmentCommand::Status { status, .. }) => {
                assert_eq!(AppointmentStatus::from(status), AppointmentStatus::InProgress);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_uuid() {
        assert!(Cli::try_parse_from(["clinicdesk", "patients", "delete", "not-a-uuid"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
