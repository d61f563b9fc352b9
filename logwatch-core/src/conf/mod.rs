//! Monitor configuration.
//!
//! Resolution order, lowest precedence first: built-in defaults, an optional TOML file, then
//! command-line/environment overrides. The result is validated once, before any processing.

mod error;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ValidationErrors};
pub use validation::{RangeConstraint, validate_config, validate_range};

use crate::alert::AlertParams;
use crate::report::DEFAULT_REPORT_INTERVAL_SECS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Retention window the alert rate is averaged over.
    pub alert_window_secs: f64,

    /// Hits per second above which the alert turns RED.
    pub alert_threshold: f64,

    /// Event-time cadence of traffic reports.
    pub report_interval_secs: u64,

    /// Real-time idle period after which the alert and reports are re-evaluated.
    pub idle_tick_millis: u64,

    /// Pause between reads while the source has nothing new.
    pub read_backoff_millis: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            alert_window_secs: 120.0,
            alert_threshold: 10.0,
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            idle_tick_millis: 1000,
            read_backoff_millis: 500,
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub alert_window_secs: Option<f64>,
    pub alert_threshold: Option<f64>,
}

impl MonitorConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))
    }

    /// Defaults, then `path` if given, then `overrides`; validated.
    pub fn resolve(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        cfg.apply(overrides);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(window) = overrides.alert_window_secs {
            self.alert_window_secs = window;
        }
        if let Some(threshold) = overrides.alert_threshold {
            self.alert_threshold = threshold;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)
    }

    /// Only meaningful on a validated config.
    pub fn alert_window(&self) -> Duration {
        Duration::try_from_secs_f64(self.alert_window_secs).unwrap_or(Duration::ZERO)
    }

    pub fn alert_params(&self) -> AlertParams {
        AlertParams {
            window: self.alert_window(),
            threshold: self.alert_threshold,
        }
    }

    pub fn idle_tick(&self) -> Duration {
        Duration::from_millis(self.idle_tick_millis)
    }

    pub fn read_backoff(&self) -> Duration {
        Duration::from_millis(self.read_backoff_millis)
    }
}

impl FromStr for MonitorConfig {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
