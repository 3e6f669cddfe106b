//! Owner-scoped access to the hosted clinic database
//!
//! The clinic's rows live in a hosted Postgres exposed through PostgREST.
//! This crate provides:
//! - [`RemoteStore`]: select/insert/update/delete over a table
//! - [`Query`]: equality filters, ordering, projections with embedded rows
//! - [`OwnerScope`]: row scoping by the signed-in practitioner
//! - [`RestStore`]: the HTTP implementation
//! - [`MemoryStore`]: an in-process implementation for tests and offline use
//!
//! # Row scoping
//!
//! Every row carries a `doctor_id`. Reads filter on it, inserts are stamped
//! with it, and single-row mutations are filtered by both `id` and owner, so
//! a row belonging to another practitioner is indistinguishable from a
//! missing one.
//!
//! # Example Usage
//!
//! ```rust
//! use database_layer::{MemoryStore, OwnerScope, PractitionerId, Query, RemoteStore, Order};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! let scope = OwnerScope::new(PractitionerId::new("user_2abc"));
//!
//! let row = scope.stamp(json!({"full_name": "Asha Rao", "phone": "555-0100"}))?;
//! store.insert("patients", row, &Query::new().single()).await?;
//!
//! let query = scope.apply(Query::new().order(Order::desc("created_at")));
//! let patients = store.select("patients", &query).await?;
//! assert_eq!(patients.len(), 1);
//! # Ok::<(), database_layer::DatabaseError>(())
//! # }).unwrap();
//! ```

pub mod connection;
pub mod error;
pub mod memory;
pub mod models;
pub mod query;
pub mod rls;
pub mod store;

pub use connection::*;
pub use error::*;
pub use memory::*;
pub use models::*;
pub use query::*;
pub use rls::*;
pub use store::*;

/// PostgREST mount point under the project URL
pub const REST_PATH: &str = "/rest/v1";
