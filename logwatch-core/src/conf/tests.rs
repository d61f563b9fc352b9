use super::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn defaults_are_valid() {
    let cfg = MonitorConfig::default();
    cfg.validate().unwrap();

    assert_eq!(cfg.alert_window(), Duration::from_secs(120));
    assert_eq!(cfg.alert_threshold, 10.0);
    assert_eq!(cfg.report_interval_secs, 10);
}

#[test]
fn partial_toml_keeps_defaults() {
    let cfg: MonitorConfig = "alert_window_secs = 30.5\n".parse().unwrap();

    assert_eq!(cfg.alert_window(), Duration::from_millis(30_500));
    assert_eq!(cfg.alert_threshold, 10.0);
    assert_eq!(cfg.idle_tick_millis, 1000);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!("alert_windw_secs = 30\n".parse::<MonitorConfig>().is_err());
}

#[test]
fn overrides_win_over_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logwatch.toml");
    fs::write(&path, "alert_window_secs = 60\nalert_threshold = 5\n").unwrap();

    let overrides = ConfigOverrides {
        alert_window_secs: None,
        alert_threshold: Some(2.5),
    };
    let cfg = MonitorConfig::resolve(Some(&path), &overrides).unwrap();

    assert_eq!(cfg.alert_window_secs, 60.0);
    assert_eq!(cfg.alert_threshold, 2.5);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();
    let err = MonitorConfig::resolve(Some(&dir.path().join("nope.toml")), &Default::default())
        .unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "alert_window_secs = \"two minutes\"\n").unwrap();

    let err = MonitorConfig::resolve(Some(&path), &Default::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn non_positive_window_and_threshold_are_fatal() {
    let overrides = ConfigOverrides {
        alert_window_secs: Some(0.0),
        alert_threshold: Some(-1.0),
    };
    let err = MonitorConfig::resolve(None, &overrides).unwrap_err();

    let ConfigError::Validation { errors } = err else {
        panic!("expected validation error");
    };
    assert_eq!(
        errors.iter().collect::<Vec<_>>(),
        vec![
            "invalid alert_window_secs: 0 (must be greater than 0)",
            "invalid alert_threshold: -1 (must be greater than 0)",
        ]
    );
}

#[test]
fn nan_threshold_is_rejected() {
    let cfg = MonitorConfig {
        alert_threshold: f64::NAN,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn out_of_range_intervals_are_reported_together() {
    let cfg = MonitorConfig {
        report_interval_secs: 0,
        idle_tick_millis: 1,
        read_backoff_millis: 60_000,
        ..Default::default()
    };

    let Err(ConfigError::Validation { errors }) = cfg.validate() else {
        panic!("expected validation error");
    };
    assert_eq!(errors.0.len(), 3);
    assert_eq!(
        errors.0[0],
        "invalid report_interval_secs: 0s (must be between 1s and 86400s)"
    );
}
