//! Billing for ClinicDesk
//!
//! Provides:
//! - Invoices owned by the signed-in practitioner, newest first
//! - Invoice numbering (`INV-<unix millis>` unless supplied)
//! - Payment marking with the payment date
//! - Revenue figures for the dashboard and billing overview

pub mod service;
pub mod models;
pub mod reporting;
pub mod error;

pub use service::*;
pub use models::*;
pub use reporting::*;
pub use error::*;
