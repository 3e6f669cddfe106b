// Configuration sources: optional file overlaid by prefixed environment variables

use std::path::PathBuf;

use config::{Config, Environment, File};
use tracing::debug;

use crate::error::Result;
use crate::settings::ClinicConfig;

pub const DEFAULT_CONFIG_FILE: &str = "clinicdesk.toml";
pub const DEFAULT_ENV_PREFIX: &str = "CLINICDESK";

/// Builds a [`ClinicConfig`] from its sources.
///
/// Later sources win: file values are overridden by environment variables
/// such as `CLINICDESK__STORE__URL`.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env_prefix: String,
    load_dotenv: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: Some(PathBuf::from(DEFAULT_CONFIG_FILE)),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            load_dotenv: true,
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn without_file(mut self) -> Self {
        self.file = None;
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }

    pub fn load(&self) -> Result<ClinicConfig> {
        if self.load_dotenv {
            if let Ok(path) = dotenvy::dotenv() {
                debug!(path = %path.display(), "Loaded .env file");
            }
        }

        let mut builder = Config::builder();

        if let Some(ref file) = self.file {
            // A missing file is fine: every setting has a default or an env override.
            builder = builder.add_source(File::from(file.as_path()).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: ClinicConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}
