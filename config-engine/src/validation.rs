// Configuration validation

use secrecy::ExposeSecret;

use crate::error::{ConfigError, Result};
use crate::settings::ClinicConfig;

impl ClinicConfig {
    /// Check the settings needed for the chosen mode.
    ///
    /// Offline mode never touches the hosted store or the identity provider,
    /// so only the local settings are checked.
    pub fn validate(&self, offline: bool) -> Result<()> {
        if self.store.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "store.timeout_secs must be positive".to_string(),
            ));
        }

        if !self.meeting.base_url.starts_with("http://")
            && !self.meeting.base_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "meeting.base_url must be an http(s) URL, got '{}'",
                self.meeting.base_url
            )));
        }

        if offline {
            if self.identity.offline_user.id.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "identity.offline_user.id must not be empty".to_string(),
                ));
            }
            return Ok(());
        }

        if self.store.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store.url is required".to_string(),
            ));
        }

        let has_key = self
            .store
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty());
        if !has_key {
            return Err(ConfigError::ValidationError(
                "store.api_key is required".to_string(),
            ));
        }

        Ok(())
    }
}
