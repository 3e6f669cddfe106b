//! Practitioner identity for ClinicDesk
//!
//! Authentication is delegated to a hosted identity provider. This crate
//! provides:
//! - [`IdentityProvider`]: resolve a user id to the provider's user record
//! - [`SessionManager`]: sign in, sign out and the current session, persisted
//!   to a local file
//! - [`ensure_profile`]: create-on-first-login `profiles` row
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use auth_identity::{SessionManager, StaticIdentityProvider, IdentityUser};
//!
//! # async fn run() -> auth_identity::Result<()> {
//! let provider = StaticIdentityProvider::new(IdentityUser::new("user_offline"));
//! let sessions = SessionManager::new(Arc::new(provider), ".clinicdesk/session.json");
//!
//! let session = sessions.sign_in("user_offline").await?;
//! println!("Signed in as {}", session.user.display_name());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod profile;
pub mod provider;
pub mod session;

pub use error::*;
pub use models::*;
pub use profile::*;
pub use provider::*;
pub use session::*;
