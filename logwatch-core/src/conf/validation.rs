use crate::conf::MonitorConfig;
use crate::conf::error::{ConfigError, ValidationErrors};

#[derive(Debug, Clone)]
pub struct RangeConstraint<T> {
    pub min: T,
    pub max: T,
    pub label: &'static str,
    pub units: Option<&'static str>,
}

/// Thirty days.
pub const ALERT_WINDOW_SECS_MAX: f64 = 30.0 * 24.0 * 3600.0;

pub const REPORT_INTERVAL_SECS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 24 * 3600,
    label: "report_interval_secs",
    units: Some("s"),
};

pub const IDLE_TICK_MILLIS: RangeConstraint<u64> = RangeConstraint {
    min: 10,
    max: 60 * 1000,
    label: "idle_tick_millis",
    units: Some("ms"),
};

pub const READ_BACKOFF_MILLIS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 10 * 1000,
    label: "read_backoff_millis",
    units: Some("ms"),
};

pub fn validate_range<T>(value: T, constraint: &RangeConstraint<T>, errors: &mut ValidationErrors)
where
    T: PartialOrd + std::fmt::Display,
{
    if value < constraint.min || value > constraint.max {
        let units = constraint.units.unwrap_or("");
        errors.push(format!(
            "invalid {}: {}{} (must be between {}{} and {}{})",
            constraint.label, value, units, constraint.min, units, constraint.max, units
        ));
    }
}

fn validate_positive(value: f64, label: &str, max: Option<f64>, errors: &mut ValidationErrors) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("invalid {label}: {value} (must be greater than 0)"));
    } else if let Some(max) = max.filter(|max| value > *max) {
        errors.push(format!("invalid {label}: {value} (must be at most {max})"));
    }
}

pub fn validate_config(cfg: &MonitorConfig) -> Result<(), ConfigError> {
    let mut errors = ValidationErrors::default();

    validate_positive(
        cfg.alert_window_secs,
        "alert_window_secs",
        Some(ALERT_WINDOW_SECS_MAX),
        &mut errors,
    );
    validate_positive(cfg.alert_threshold, "alert_threshold", None, &mut errors);
    validate_range(cfg.report_interval_secs, &REPORT_INTERVAL_SECS, &mut errors);
    validate_range(cfg.idle_tick_millis, &IDLE_TICK_MILLIS, &mut errors);
    validate_range(cfg.read_backoff_millis, &READ_BACKOFF_MILLIS, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation { errors })
    }
}
