mod check;
mod watch;


pub use check::*;
pub use watch::*;

use crate::conf::{ConfigError, ConfigOverrides, MonitorConfig};
use crate::sink::OutputFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Alert window: seconds (fractions allowed) or a duration such as `2m` or `1m30s`
    #[arg(long, env = "ALERT_WINDOW", value_parser = parse_window_secs)]
    pub alert_window: Option<f64>,

    /// Alert threshold in hits per second
    #[arg(long, env = "ALERT_THRESHOLD_PER_SEC")]
    pub alert_threshold: Option<f64>,
}

/// Plain seconds, or a humantime duration.
pub fn parse_window_secs(value: &str) -> Result<f64, String> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<f64>() {
        return Ok(secs);
    }

    humantime::parse_duration(value)
        .map(|d| d.as_secs_f64())
        .map_err(|e| format!("expected seconds or a duration like `2m`: {e}"))
}

impl ConfigArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            alert_window_secs: self.alert_window,
            alert_threshold: self.alert_threshold,
        }
    }

    pub fn resolve(&self) -> Result<MonitorConfig, ConfigError> {
        MonitorConfig::resolve(self.config.as_deref(), &self.overrides())
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    /// CSV access log to follow; stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Format of report and alert lines
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(flatten)]
    pub config: ConfigArgs,
}
