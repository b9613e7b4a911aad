//! Endpoint configuration for the campus backend.

use crate::error::{RawError, RawResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};

/// Configuration for an [`ApiClient`](crate::client::ApiClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://api.campus.example`.
    pub base_url: String,
    /// Bearer token attached to every request, when present.
    pub auth_token: Option<String>,
    /// Transport-level timeout. This layer imposes no other deadline.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Validate the configuration is complete.
    ///
    /// # Errors
    ///
    /// Returns [`RawError::Local`] if the base URL is missing or not an
    /// http(s) origin, or the timeout is zero.
    pub fn validate(&self) -> RawResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(RawError::local("base_url is required"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(RawError::local(format!(
                "base_url must be an http(s) origin, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(RawError::local("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Build a configuration from environment variables.
    ///
    /// `CAMPUS_API_BASE_URL` is required; `CAMPUS_API_TOKEN` and
    /// `CAMPUS_API_TIMEOUT_SECS` are optional.
    ///
    /// # Errors
    ///
    /// Returns [`RawError::Local`] if the base URL variable is missing or
    /// the timeout variable does not parse.
    pub fn from_env() -> RawResult<Self> {
        let base_url = std::env::var("CAMPUS_API_BASE_URL")
            .map_err(|_| RawError::local("CAMPUS_API_BASE_URL is not set"))?;
        let auth_token = std::env::var("CAMPUS_API_TOKEN").ok();
        let timeout_secs = match std::env::var("CAMPUS_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                RawError::local(format!("CAMPUS_API_TIMEOUT_SECS is not a number: '{raw}'"))
            })?,
            Err(_) => Self::default().timeout_secs,
        };

        let config = Self {
            base_url,
            auth_token,
            timeout_secs,
        };
        config.validate()?;

        log_debug!(
            base_url = %config.base_url,
            has_token = config.auth_token.is_some(),
            timeout_secs = config.timeout_secs,
            "ApiConfig loaded from environment"
        );
        Ok(config)
    }
}
