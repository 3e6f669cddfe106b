//! Common error handling utilities for ClinicDesk
//!
//! This crate provides the error type shared by every ClinicDesk crate, the
//! error codes attached to it, and the user-facing notification channel that
//! data-access stores use to report the outcome of each remote call.
//!
//! # Error Categories
//!
//! - **ValidationError**: malformed input (empty names, bad dates, ...)
//! - **AuthError**: no signed-in practitioner, or the session is unusable
//! - **NotFound**: the row does not exist for this practitioner
//! - **StoreError**: the hosted database rejected or failed a request
//! - **IdentityError**: the identity provider failed
//! - **DocumentError**: PDF rendering failed
//! - **ConfigError**: configuration could not be loaded or is invalid
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use error_common::{ClinicError, ErrorReporter, RecordingNotifier};
//!
//! let notifier = Arc::new(RecordingNotifier::new());
//! let reporter = ErrorReporter::new(notifier.clone());
//!
//! let err = ClinicError::StoreError("connection reset".to_string());
//! reporter.report_failure("adding patient", "Failed to add patient", &err);
//!
//! assert!(notifier.has_failure());
//! ```

pub mod types;
pub mod codes;
pub mod reporting;

pub use types::*;
pub use codes::*;
pub use reporting::*;
