// Video meeting room links
use chrono::Utc;
use config_engine::MeetingConfig;

const FALLBACK_SLUG: &str = "patient";

/// Builds room URLs of the form `{base}/{prefix}-{slug}-{unix millis}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingLinks {
    base_url: String,
    room_prefix: String,
}

impl Default for MeetingLinks {
    fn default() -> Self {
        Self::from_config(&MeetingConfig::default())
    }
}

impl MeetingLinks {
    pub fn new(base_url: &str, room_prefix: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            room_prefix: room_prefix.to_string(),
        }
    }

    pub fn from_config(config: &MeetingConfig) -> Self {
        Self::new(&config.base_url, &config.room_prefix)
    }

    /// Room named after the patient, unique per millisecond
    pub fn room_for(&self, patient_name: Option<&str>) -> String {
        self.room_at(&slug(patient_name), Utc::now().timestamp_millis())
    }

    /// Ad-hoc room not tied to a record
    pub fn instant(&self) -> String {
        self.room_at("instant", Utc::now().timestamp_millis())
    }

    pub fn room_at(&self, slug: &str, millis: i64) -> String {
        format!("{}/{}-{}-{}", self.base_url, self.room_prefix, slug, millis)
    }
}

/// Lowercased name with whitespace runs collapsed to `-`
pub fn slug(name: Option<&str>) -> String {
    let words: Vec<String> = name
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    if words.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        words.join("-")
    }
}
