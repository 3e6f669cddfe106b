use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw row as exchanged with the hosted database
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Table names exposed by the hosted database
pub mod tables {
    pub const PATIENTS: &str = "patients";
    pub const APPOINTMENTS: &str = "appointments";
    pub const PRESCRIPTIONS: &str = "prescriptions";
    pub const BILLING: &str = "billing";
    pub const TELECONSULTATIONS: &str = "teleconsultations";
    pub const PROFILES: &str = "profiles";

    pub const ALL: [&str; 6] = [
        PATIENTS,
        APPOINTMENTS,
        PRESCRIPTIONS,
        BILLING,
        TELECONSULTATIONS,
        PROFILES,
    ];
}

/// Identity-provider user id of the signed-in clinician (e.g. `user_2Nf...`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PractitionerId(String);

impl PractitionerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PractitionerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PractitionerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
