//! Runtime configuration loaded from `recruitflow.toml`.
//!
//! [`AppConfig`] holds every tunable. Keys missing from the file fall back to
//! defaults. The `RECRUITFLOW_API_URL` environment variable takes precedence
//! over the file for the API base URL; CLI flags override both.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use crate::api::DEFAULT_BASE_URL;
use crate::error::RecruitError;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "recruitflow.toml";

/// Environment variable overriding [`AppConfig::api_base_url`].
pub const API_URL_ENV: &str = "RECRUITFLOW_API_URL";

/// Top-level configuration loaded from `recruitflow.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the recruiting API, e.g. `http://localhost:8000/api/v1`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds. Matching many resumes is slow.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Seconds shown in the completion dialog before returning to step 1.
    #[serde(default = "default_completion_countdown_secs")]
    pub completion_countdown_secs: u32,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_completion_countdown_secs() -> u32 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            completion_countdown_secs: default_completion_countdown_secs(),
        }
    }
}

impl AppConfig {
    /// Loads `recruitflow.toml` from the current directory, then applies the
    /// environment override. Not validated: CLI overrides still apply, so
    /// callers run [`validate`](Self::validate) last.
    pub fn load() -> Result<Self> {
        Self::load_with_env(Path::new(CONFIG_FILE), std::env::var(API_URL_ENV).ok())
    }

    fn load_with_env(path: &Path, env_url: Option<String>) -> Result<Self> {
        let mut config = Self::load_from(path)?;
        config.apply_api_url(env_url);
        Ok(config)
    }

    /// Checks values serde cannot: the URL scheme and non-zero timeouts.
    pub fn validate(&self) -> Result<(), RecruitError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(RecruitError::Config(format!(
                "api_base_url must start with http:// or https://, got `{}`",
                self.api_base_url
            )));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(RecruitError::Config("timeouts must be greater than zero".into()));
        }
        Ok(())
    }

    /// Loads the given file, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str::<AppConfig>(&contents)?)
    }

    /// Replaces the base URL when `url` is present and non-empty.
    pub fn apply_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
    }
}
