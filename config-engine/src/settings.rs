use std::path::PathBuf;

use logger_redacted::LoggerConfig;
use secrecy::SecretString;
use serde::Deserialize;

/// Root configuration for the ClinicDesk workspace
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub store: StoreConfig,
    pub identity: IdentityConfig,
    pub meeting: MeetingConfig,
    pub documents: DocumentsConfig,
    pub logging: LoggerConfig,
}

/// Hosted database (PostgREST endpoint)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub url: String,
    /// Publishable API key sent as `apikey` and bearer token
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Third-party identity provider and local session
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Identity provider backend API
    pub api_url: String,
    pub secret_key: Option<SecretString>,
    /// Where the signed-in session is persisted between invocations
    pub session_file: PathBuf,
    /// Identity served in offline mode
    pub offline_user: OfflineUser,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.clerk.com".to_string(),
            secret_key: None,
            session_file: PathBuf::from(".clinicdesk/session.json"),
            offline_user: OfflineUser::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OfflineUser {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl Default for OfflineUser {
    fn default() -> Self {
        Self {
            id: "user_offline".to_string(),
            first_name: None,
            last_name: None,
            email: None,
        }
    }
}

/// Video meeting room links
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MeetingConfig {
    pub base_url: String,
    pub room_prefix: String,
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://meet.jit.si".to_string(),
            room_prefix: "docconnect".to_string(),
        }
    }
}

/// Generated invoice and prescription documents
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    pub clinic_name: String,
    /// Printed before amounts; the built-in PDF fonts are WinAnsi only
    pub currency_symbol: String,
    pub output_dir: PathBuf,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            clinic_name: "DocConnect Clinic".to_string(),
            currency_symbol: "Rs. ".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}
