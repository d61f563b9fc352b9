use super::ConfigArgs;
use crate::conf::{ConfigError, MonitorConfig};

/// Resolve and validate the configuration, printing the result.
pub fn check(args: &ConfigArgs) -> Result<MonitorConfig, ConfigError> {
    match args.resolve() {
        Ok(cfg) => {
            println!("✔ Config is valid");
            println!(
                "✔ alert when > {} hits/s averaged over {}s",
                cfg.alert_threshold, cfg.alert_window_secs
            );
            println!("✔ report every {}s of event time", cfg.report_interval_secs);
            println!(
                "✔ idle tick {}ms, read backoff {}ms",
                cfg.idle_tick_millis, cfg.read_backoff_millis
            );
            Ok(cfg)
        }
        Err(err) => {
            print_config_error(&err);
            Err(err)
        }
    }
}

pub fn print_config_error(err: &ConfigError) {
    eprintln!("{err}");
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::Validation { .. } => Some(
            "Window and threshold must both be positive numbers.\n\
             \n\
             Example:\n\
             \n\
             alert_window_secs = 120\n\
             alert_threshold   = 10",
        ),
        ConfigError::Parse { .. } => Some(
            "Known keys: alert_window_secs, alert_threshold, report_interval_secs,\n\
             idle_tick_millis, read_backoff_millis.",
        ),
        ConfigError::ReadFile { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::ValidationErrors;

    #[test]
    fn validation_errors_get_a_hint_but_read_errors_do_not() {
        let invalid = ConfigError::Validation {
            errors: ValidationErrors(vec!["invalid alert_threshold: 0".into()]),
        };
        let missing = ConfigError::read_file(
            "missing.toml",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );

        assert!(config_error_hint(&invalid).is_some_and(|hint| hint.contains("alert_threshold")));
        assert!(config_error_hint(&missing).is_none());
    }

    #[test]
    fn check_rejects_non_positive_window() {
        let args = ConfigArgs {
            alert_window: Some(0.0),
            ..Default::default()
        };

        assert!(matches!(check(&args), Err(ConfigError::Validation { .. })));
    }
}
