//! Loadable retry settings
//!
//! [`RetrySettings`] is the serializable form of a retry budget and delay
//! strategy, meant to live in a service's TOML configuration:
//!
//! ```toml
//! retry_times = 4
//!
//! [delay]
//! strategy = "exponential"
//! base_ms = 100
//! max_ms = 5000
//! ```
//!
//! Observers are code, not data, so settings convert into a
//! [`RetryConfigBuilder`] that callers can finish with their own callbacks.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{RetryConfig, RetryConfigBuilder};
use crate::constants::{DEFAULT_DELAY, DEFAULT_RETRY_TIMES, MAX_RETRY_TIMES};
use crate::delay::DelayStrategy;
use crate::error::SettingsError;
use crate::utils::duration_millis;

/// Serializable retry budget and delay strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    /// Number of retries after the first attempt
    pub retry_times: u32,
    /// Delay strategy between attempts
    pub delay: DelaySettings,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self { retry_times: DEFAULT_RETRY_TIMES, delay: DelaySettings::default() }
    }
}

/// Serializable delay strategy, tagged by `strategy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case", deny_unknown_fields)]
pub enum DelaySettings {
    Fixed {
        #[serde(rename = "delay_ms", with = "duration_millis")]
        delay: Duration,
    },
    Linear {
        #[serde(rename = "base_ms", with = "duration_millis")]
        base: Duration,
        #[serde(rename = "max_ms", with = "duration_millis")]
        max: Duration,
    },
    Exponential {
        #[serde(rename = "base_ms", with = "duration_millis")]
        base: Duration,
        #[serde(rename = "max_ms", with = "duration_millis")]
        max: Duration,
    },
    Random {
        #[serde(rename = "min_ms", with = "duration_millis")]
        min: Duration,
        #[serde(rename = "max_ms", with = "duration_millis")]
        max: Duration,
        /// Seed for reproducible delays; entropy-seeded when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self::Fixed { delay: DEFAULT_DELAY }
    }
}

impl DelaySettings {
    /// Check that bounded strategies have `lower <= max`
    pub fn validate(&self) -> Result<(), SettingsError> {
        match self {
            Self::Fixed { .. } => Ok(()),
            Self::Linear { base, max } | Self::Exponential { base, max } if base > max => {
                Err(SettingsError::invalid(
                    "delay.base_ms",
                    format!("base ({base:?}) cannot be greater than max ({max:?})"),
                ))
            }
            Self::Random { min, max, .. } if min > max => Err(SettingsError::invalid(
                "delay.min_ms",
                format!("min ({min:?}) cannot be greater than max ({max:?})"),
            )),
            _ => Ok(()),
        }
    }

    /// Build the runtime strategy these settings describe
    pub fn to_strategy<E: 'static>(&self) -> DelayStrategy<E> {
        match *self {
            Self::Fixed { delay } => DelayStrategy::fixed(delay),
            Self::Linear { base, max } => DelayStrategy::linear(base, max),
            Self::Exponential { base, max } => DelayStrategy::exponential(base, max),
            Self::Random { min, max, seed: Some(seed) } => {
                DelayStrategy::random_seeded(min, max, seed)
            }
            Self::Random { min, max, seed: None } => DelayStrategy::random(min, max),
        }
    }
}

impl RetrySettings {
    /// Parse and validate settings from a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate settings from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    /// Validate the retry budget and delay strategy
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.retry_times > MAX_RETRY_TIMES {
            return Err(SettingsError::invalid(
                "retry_times",
                format!("must be at most {MAX_RETRY_TIMES}, got {}", self.retry_times),
            ));
        }
        self.delay.validate()
    }

    /// A builder preloaded with these settings
    pub fn to_builder<E: 'static>(&self) -> RetryConfigBuilder<E> {
        RetryConfig::builder().times(self.retry_times).delay_strategy(self.delay.to_strategy())
    }

    /// A configuration with these settings and no observers
    pub fn to_config<E: 'static>(&self) -> RetryConfig<E> {
        self.to_builder().build()
    }
}
