use crate::alert::{AlertEvent, AlertState};
use crate::report::TrafficReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Everything the monitor hands to a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonitorEvent {
    Report(TrafficReport),
    Alert(AlertEvent),
}

impl From<TrafficReport> for MonitorEvent {
    fn from(report: TrafficReport) -> Self {
        Self::Report(report)
    }
}

impl From<AlertEvent> for MonitorEvent {
    fn from(alert: AlertEvent) -> Self {
        Self::Alert(alert)
    }
}

pub(crate) struct EventTime(pub i64);

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp(self.0, 0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "@{}", self.0),
        }
    }
}

impl fmt::Display for TrafficReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} hits from {} hosts with {} bytes transferred, top {} with {} hits",
            EventTime(self.ts),
            self.hits,
            self.hosts,
            self.bytes,
            self.top_label(),
            self.top_hits
        )
    }
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, comparison) = match self.state {
            AlertState::Red => ("RED", "higher than"),
            AlertState::Green => ("GREEN", "not higher than"),
        };
        write!(
            f,
            "{}: Alert {label}, ~{:.2} hits per second which is {comparison} {} ({} total) in the last {}s",
            EventTime(self.ts),
            self.rate,
            self.threshold,
            self.total_hits,
            self.window_secs
        )
    }
}

impl fmt::Display for MonitorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorEvent::Report(report) => report.fmt(f),
            MonitorEvent::Alert(alert) => alert.fmt(f),
        }
    }
}
