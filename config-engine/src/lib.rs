//! Configuration management for ClinicDesk
//!
//! Settings are layered from an optional `clinicdesk.toml`, a `.env` file and
//! `CLINICDESK__`-prefixed environment variables (double underscores separate
//! nesting levels).
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::ConfigLoader;
//!
//! let config = ConfigLoader::new().with_file("clinicdesk.toml").load()?;
//! config.validate(false)?;
//! println!("store: {}", config.store.url);
//! # Ok::<(), config_engine::ConfigError>(())
//! ```
//!
//! ```toml
//! [store]
//! url = "https://abcd.supabase.co"
//! api_key = "eyJhbGciOi..."
//!
//! [meeting]
//! base_url = "https://meet.jit.si"
//! room_prefix = "docconnect"
//!
//! [documents]
//! clinic_name = "DocConnect Clinic"
//! ```

pub mod settings;
pub mod providers;
pub mod validation;
pub mod error;

pub use settings::*;
pub use providers::*;
pub use error::*;
