//! Printable documents for ClinicDesk
//!
//! Invoices and prescriptions are first laid out as positioned text, rules
//! and frames ([`Layout`]) and then rendered to a single A4 PDF page with
//! the built-in Helvetica faces.
//!
//! ```rust,no_run
//! # fn run(bill: &billing_service::Bill) -> document_service::DocumentResult<()> {
//! use config_engine::DocumentsConfig;
//!
//! let config = DocumentsConfig::default();
//! let path = document_service::export_invoice(bill, &config)?;
//! println!("saved {}", path.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use billing_service::Bill;
use config_engine::DocumentsConfig;
use records_service::Prescription;

pub mod error;
pub mod invoice;
pub mod layout;
pub mod prescription;
pub mod render;

pub use error::*;
pub use invoice::*;
pub use layout::*;
pub use prescription::*;
pub use render::*;

/// Render a bill's invoice into `config.output_dir`
pub fn export_invoice(bill: &Bill, config: &DocumentsConfig) -> DocumentResult<PathBuf> {
    let bytes = render(&invoice_layout(bill, config))?;
    export(&config.output_dir, &invoice_file_name(bill), &bytes)
}

/// Render a prescription into `config.output_dir`
pub fn export_prescription(
    prescription: &Prescription,
    prescriber: &str,
    config: &DocumentsConfig,
) -> DocumentResult<PathBuf> {
    let bytes = render(&prescription_layout(prescription, prescriber, config))?;
    export(&config.output_dir, &prescription_file_name(prescription), &bytes)
}

/// Keep only characters that are safe in a file name
pub(crate) fn file_component(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect()
}
