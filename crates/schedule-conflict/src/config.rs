//! Conflict service configuration.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{ConflictError, Result};
use crate::local_date::parse_timezone;

/// Zone used when neither the caller nor the company supplies one.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// What to do with a timezone identifier that is not a valid IANA zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezonePolicy {
    /// Treat UTC calendar dates as local, log a warning, and flag the result.
    #[default]
    Fallback,
    /// Fail the check with [`ConflictError::InvalidTimezone`].
    Strict,
}

impl std::str::FromStr for TimezonePolicy {
    type Err = ConflictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" => Ok(TimezonePolicy::Fallback),
            "strict" => Ok(TimezonePolicy::Strict),
            other => Err(ConflictError::Config(format!(
                "unknown timezone policy '{}' (expected 'fallback' or 'strict')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictConfig {
    /// IANA zone for companies without a configured timezone.
    pub default_timezone: String,
    pub timezone_policy: TimezonePolicy,
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            timezone_policy: TimezonePolicy::default(),
        }
    }
}

impl ConflictConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SCHEDULE_DEFAULT_TIMEZONE` (optional, default: `America/New_York`)
    /// - `SCHEDULE_TIMEZONE_POLICY` (optional, default: `fallback`): `fallback` | `strict`
    ///
    /// # Errors
    /// Returns [`ConflictError::Config`] for an unknown policy or an invalid
    /// default timezone.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(tz) = env::var("SCHEDULE_DEFAULT_TIMEZONE") {
            if !tz.trim().is_empty() {
                config.default_timezone = tz.trim().to_string();
            }
        }
        if let Ok(policy) = env::var("SCHEDULE_TIMEZONE_POLICY") {
            config.timezone_policy = policy.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_default_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.default_timezone = timezone.into();
        self
    }

    pub fn with_timezone_policy(mut self, policy: TimezonePolicy) -> Self {
        self.timezone_policy = policy;
        self
    }

    /// The default timezone must always resolve, whatever the policy.
    pub fn validate(&self) -> Result<()> {
        parse_timezone(&self.default_timezone)
            .map(|_| ())
            .map_err(|_| {
                ConflictError::Config(format!(
                    "default timezone '{}' is not a valid IANA timezone",
                    self.default_timezone
                ))
            })
    }
}
