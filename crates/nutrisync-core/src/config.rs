//! Client configuration.
//!
//! The only environment input is the plan service base URL
//! (`NUTRISYNC_API_URL`); everything else comes from defaults or
//! command-line overrides.

use std::env;
use std::path::PathBuf;

use crate::error::{NutriError, Result};
use crate::form::PlanProfile;

pub const DEFAULT_API_URL: &str = "https://biobyte-backend.onrender.com";
pub const API_URL_ENV: &str = "NUTRISYNC_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the plan service, without a trailing slash.
    pub base_url: String,
    /// Directory for the durable session record. `None` means the platform default.
    pub data_dir: Option<PathBuf>,
    pub profile: PlanProfile,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            profile: PlanProfile::default(),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration, honoring `NUTRISYNC_API_URL` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = env::var(API_URL_ENV) {
            config = config.with_base_url(url)?;
        }
        Ok(config)
    }

    /// Overrides the base URL after construction.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.base_url = normalize_base_url(&url.into())?;
        Ok(self)
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_profile(mut self, profile: PlanProfile) -> Self {
        self.profile = profile;
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(NutriError::config(format!(
            "API base URL must start with http:// or https://, got '{}'",
            raw
        )));
    }
    Ok(trimmed.to_string())
}
