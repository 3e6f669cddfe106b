//! ClinicDesk command-line interface
//!
//! The `clinicdesk` binary exposes one subcommand group per record type:
//!
//! - **auth**: sign in, sign out, current practitioner
//! - **patients**, **appointments**, **prescriptions**: records CRUD
//! - **billing**: invoices, payments, revenue report, invoice PDFs
//! - **teleconsult**: scheduled video consultations and instant rooms
//! - **dashboard**: today's figures
//!
//! With `--offline` the records live in a local JSON file instead of the
//! hosted database, and the configured offline user is the only identity.

pub mod cli;
pub mod commands;
pub mod context;
pub mod offline;
pub mod output;

pub use cli::*;
pub use context::*;
pub use output::*;
