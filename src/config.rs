use crate::constants::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Run configuration with all values filled in (no Options).
///
/// Every key is optional in the TOML file; missing keys take the defaults
/// below. Unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Scheme and host of the SWOL portal
    pub base_url: String,
    /// Courtesy delay in milliseconds before the login POST and every export GET
    pub request_delay_ms: u64,
    /// Upper bound on the number of months exported in one run.
    /// Longer ranges keep the most recent months.
    pub max_months: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay_ms: 500,
            max_months: 24,
            timeout_secs: 60,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ExportConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, unknown keys are present,
    /// or `max_months`/`timeout_secs` are zero. Returns `UrlError` if `base_url`
    /// does not parse.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ExportConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.max_months == 0 {
            return Err(AppError::InvalidInput(
                "max_months must be greater than 0".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidInput(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        self.base_url()?;
        Ok(())
    }

    pub fn base_url(&self) -> AppResult<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
