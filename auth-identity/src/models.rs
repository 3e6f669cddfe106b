use chrono::{DateTime, Utc};
use database_layer::PractitionerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name used when the identity provider knows no name for the user
pub const UNKNOWN_PRACTITIONER: &str = "Unknown Doctor";

/// A user as known to the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl IdentityUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            full_name: None,
            email: None,
        }
    }

    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.first_name = Some(first.to_string());
        self.last_name = Some(last.to_string());
        self
    }

    pub fn practitioner_id(&self) -> PractitionerId {
        PractitionerId::new(self.id.as_str())
    }

    /// Full name, else "first last", else [`UNKNOWN_PRACTITIONER`]
    pub fn display_name(&self) -> String {
        if let Some(full) = non_blank(self.full_name.as_deref()) {
            return full.to_string();
        }

        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .filter_map(non_blank)
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            UNKNOWN_PRACTITIONER.to_string()
        } else {
            joined
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The locally persisted sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: IdentityUser,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: IdentityUser) -> Self {
        Self {
            user,
            signed_in_at: Utc::now(),
        }
    }

    pub fn practitioner_id(&self) -> PractitionerId {
        self.user.practitioner_id()
    }
}

/// Row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a first-login profile; `user_id` is stamped by the owner scope
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub full_name: String,
}
