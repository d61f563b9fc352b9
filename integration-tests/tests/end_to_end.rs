use integration_tests::harness::{LogFile, RunningMonitor, wait_for};
use logwatch_core::MonitorConfig;
use logwatch_core::alert::AlertState;
use logwatch_core::source::CsvTailSource;
use pretty_assertions::assert_eq;
use std::time::Duration;

mod common;
use common::{T0, TIMEOUT, alerts, reports};

fn fast_config() -> MonitorConfig {
    MonitorConfig {
        read_backoff_millis: 10,
        idle_tick_millis: 50,
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_file_produces_no_output() {
    // Arrange
    let log = LogFile::new();
    let source = CsvTailSource::open(log.path()).unwrap();

    // Act
    let monitor = RunningMonitor::start(&fast_config(), source);
    tokio::time::sleep(Duration::from_millis(300)).await;
    let events = monitor.events();
    let stats = monitor.stop().await;

    // Assert
    assert!(events.is_empty());
    assert_eq!(stats.processed, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn header_and_single_record_produce_no_output() {
    // Arrange
    let mut log = LogFile::new();
    log.header().hit(T0, "api");
    let source = CsvTailSource::open(log.path()).unwrap();

    // Act
    let monitor = RunningMonitor::start(&fast_config(), source);
    tokio::time::sleep(Duration::from_millis(300)).await;
    let events = monitor.events();
    let stats = monitor.stop().await;

    // Assert
    assert!(events.is_empty());
    assert_eq!(stats.processed, 1);
    assert_eq!(stats.rejected, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn appended_record_triggers_report_for_first_interval() {
    // Arrange
    let mut log = LogFile::new();
    log.header().hit(T0, "api");
    let source = CsvTailSource::open(log.path()).unwrap();
    let monitor = RunningMonitor::start(&fast_config(), source);
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Act
    log.hit(T0 + 31, "report");
    let reported = wait_for(TIMEOUT, || !monitor.events().is_empty()).await;
    let events = monitor.events();
    let lines = monitor.sink.lines();
    monitor.stop().await;

    // Assert
    assert!(reported, "no report after the appended record");
    let reports = reports(&events);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].ts, T0);
    assert_eq!(reports[0].hits, 1);
    assert_eq!(reports[0].top_sections, vec!["api".to_string()]);
    assert!(alerts(&events).is_empty());
    assert_eq!(
        lines[0],
        "2019-02-07 21:11:00 UTC: 1 hits from 1 hosts with 1234 bytes transferred, \
         top api with 1 hits"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn burst_then_trickle_alerts_once_each_way() {
    // Arrange
    let config = MonitorConfig {
        alert_window_secs: 10.0,
        alert_threshold: 1.0,
        ..fast_config()
    };
    let mut log = LogFile::new();
    for offset in 0..30 {
        for _ in 0..3 {
            log.hit(T0 + offset, "api");
        }
    }
    for offset in (35..=80).step_by(5) {
        log.hit(T0 + offset, "api");
    }
    let source = CsvTailSource::open(log.path()).unwrap();

    // Act
    let monitor = RunningMonitor::start(&config, source);
    let recovered = wait_for(TIMEOUT, || alerts(&monitor.events()).len() >= 2).await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    let events = monitor.events();
    let stats = monitor.stop().await;

    // Assert
    assert!(recovered, "alert never recovered");
    assert_eq!(
        alerts(&events),
        vec![(AlertState::Red, T0 + 3), (AlertState::Green, T0 + 40)]
    );
    assert_eq!(stats.processed, 100);
    assert_eq!(stats.alerts, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stalled_input_drains_alert_on_idle_ticks() {
    // Arrange
    let config = MonitorConfig {
        alert_window_secs: 2.0,
        alert_threshold: 1.0,
        ..fast_config()
    };
    let mut log = LogFile::new();
    for offset in 0..5 {
        for _ in 0..3 {
            log.hit(T0 + offset, "api");
        }
    }
    let source = CsvTailSource::open(log.path()).unwrap();

    // Act
    let monitor = RunningMonitor::start(&config, source);
    let recovered = wait_for(TIMEOUT, || {
        alerts(&monitor.events())
            .iter()
            .any(|(state, _)| *state == AlertState::Green)
    })
    .await;
    let events = monitor.events();
    monitor.stop().await;

    // Assert
    assert!(recovered, "alert stayed RED with no input");
    let alerts = alerts(&events);
    assert_eq!(alerts[0], (AlertState::Red, T0));
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[1].0, AlertState::Green);
    assert!(alerts[1].1 > T0 + 4);
}
