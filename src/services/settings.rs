//! Runtime configuration
//!
//! Precedence: explicit override (CLI flag) > environment variable > default.

use std::path::PathBuf;
use std::time::Duration;

use directories::BaseDirs;

use crate::services::remote::REQUEST_TIMEOUT_SECS;
use crate::services::resolver::DEFAULT_MAX_LOOKBACK_DAYS;
use crate::types::{AistrologError, Result};

pub const ENV_DATA_DIR: &str = "AISTROLOG_DATA_DIR";
pub const ENV_BACKEND_URL: &str = "AISTROLOG_BACKEND_URL";
pub const ENV_MAX_LOOKBACK_DAYS: &str = "AISTROLOG_MAX_LOOKBACK_DAYS";
pub const ENV_TIMEOUT_SECS: &str = "AISTROLOG_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding content files and the rankings history
    pub data_dir: PathBuf,
    /// Backend base URL, without trailing slash
    pub backend_url: Option<String>,
    pub max_lookback_days: u32,
    pub request_timeout: Duration,
}

/// Values given explicitly by the caller
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub data_dir: Option<PathBuf>,
    pub backend_url: Option<String>,
    pub max_lookback_days: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Defaults for everything except the data directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            backend_url: None,
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Build settings from overrides and the process environment
    pub fn load(overrides: SettingsOverrides) -> Result<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    fn resolve(
        overrides: SettingsOverrides,
        read_env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let env = |key: &str| read_env(key).filter(|v| !v.trim().is_empty());

        let data_dir = match overrides.data_dir.or_else(|| env(ENV_DATA_DIR).map(PathBuf::from)) {
            Some(dir) => dir,
            None => Self::default_data_dir()?,
        };

        let backend_url = overrides
            .backend_url
            .or_else(|| env(ENV_BACKEND_URL))
            .and_then(|url| normalize_backend_url(&url));

        let max_lookback_days = match overrides.max_lookback_days {
            Some(days) => days,
            None => parse_env(ENV_MAX_LOOKBACK_DAYS, env(ENV_MAX_LOOKBACK_DAYS))?
                .unwrap_or(DEFAULT_MAX_LOOKBACK_DAYS),
        };

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => parse_env(ENV_TIMEOUT_SECS, env(ENV_TIMEOUT_SECS))?
                .unwrap_or(REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            data_dir,
            backend_url,
            max_lookback_days,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Get the default data directory (~/.aistrolog/data)
    pub fn default_data_dir() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| AistrologError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".aistrolog").join("data"))
    }
}

/// Trim the URL and its trailing slashes; blank means no backend
fn normalize_backend_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: Option<String>) -> Result<Option<T>> {
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|_| {
                AistrologError::Config(format!(
                    "{} must be a non-negative integer, got '{}'",
                    key, v
                ))
            })
        })
        .transpose()
}
