use logwatch_core::MonitorEvent;
use logwatch_core::alert::AlertState;
use logwatch_core::report::TrafficReport;
use std::time::Duration;

pub const T0: i64 = 1_549_573_860;
pub const TIMEOUT: Duration = Duration::from_secs(10);

pub fn alerts(events: &[MonitorEvent]) -> Vec<(AlertState, i64)> {
    events
        .iter()
        .filter_map(|event| match event {
            MonitorEvent::Alert(alert) => Some((alert.state, alert.ts)),
            MonitorEvent::Report(_) => None,
        })
        .collect()
}

#[allow(dead_code)]
pub fn reports(events: &[MonitorEvent]) -> Vec<TrafficReport> {
    events
        .iter()
        .filter_map(|event| match event {
            MonitorEvent::Report(report) => Some(report.clone()),
            MonitorEvent::Alert(_) => None,
        })
        .collect()
}
