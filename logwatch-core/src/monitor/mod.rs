//! Record-processing engine.
//!
//! [`Monitor`] is the single owner of all mutable state: the history store, the alert state
//! and the report cursor. Everything runs on one task; the reader thread only hands raw records
//! over a channel.
//!
//! Per record:
//!
//! parse
//! history insert
//! report cadence check (before eviction, so the closing interval is intact)
//! stale bucket eviction
//! alert evaluation
//!
//! Idle ticks run the last three steps against event time advanced by the real time spent
//! waiting, so an alert clears even when the feed goes quiet. Idle reports keep their own cadence
//! and never claim seconds that later records may still fill.

mod reader;
mod run;


pub use reader::spawn_reader;

use crate::alert::AlertMonitor;
use crate::conf::MonitorConfig;
use crate::event::MonitorEvent;
use crate::history::HistoryStore;
use crate::record::{Record, parse_record};
use crate::report::{Reporter, TrafficReport};
use crate::sink::EventSink;
use serde::Serialize;
use std::time::Duration;

/// Counters returned when a run stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub processed: u64,
    pub rejected: u64,
    pub reports: u64,
    pub alerts: u64,
}

pub struct Monitor<S> {
    history: HistoryStore,
    alert: AlertMonitor,
    reporter: Reporter,
    window: Duration,
    idle_tick: Duration,
    read_backoff: Duration,
    latest_ts: Option<i64>,
    sink: S,
    stats: RunStats,
}

impl<S: EventSink> Monitor<S> {
    /// `config` is expected to have passed validation.
    pub fn new(config: &MonitorConfig, sink: S) -> Self {
        Self {
            history: HistoryStore::new(),
            alert: AlertMonitor::new(config.alert_params()),
            reporter: Reporter::new(config.report_interval_secs),
            window: config.alert_window(),
            idle_tick: config.idle_tick(),
            read_backoff: config.read_backoff(),
            latest_ts: None,
            sink,
            stats: RunStats::default(),
        }
    }

    /// Parse and process one raw record. Malformed records are counted and dropped.
    pub fn process_raw<F: AsRef<str>>(&mut self, raw: &[F]) -> bool {
        match parse_record(raw) {
            Some(record) => {
                self.process_record(&record);
                true
            }
            None => {
                self.stats.rejected += 1;
                false
            }
        }
    }

    pub fn process_record(&mut self, record: &Record) {
        self.stats.processed += 1;

        let ts = record.timestamp;
        self.history
            .record(ts, &record.section, &record.remote_host, record.bytes);

        let latest = self.latest_ts.map_or(ts, |latest| latest.max(ts));
        self.latest_ts = Some(latest);

        let report = self.reporter.observe(ts, &self.history);
        self.settle(report, ts, latest);
    }

    /// Re-evaluate after `elapsed` real time without input.
    ///
    /// Does nothing before the first record.
    pub fn on_idle_tick(&mut self, elapsed: Duration) {
        let Some(latest) = self.latest_ts else {
            return;
        };

        let now = latest.saturating_add(elapsed.as_secs() as i64);
        tracing::trace!(latest, now, "idle tick");
        let report = self.reporter.observe_idle(now, latest, &self.history);
        self.settle(report, now, now);
    }

    /// Emit a due report, then evict and re-evaluate the alert at event time `now`.
    fn settle(&mut self, report: Option<TrafficReport>, now: i64, evict_from: i64) {
        if let Some(report) = report {
            self.stats.reports += 1;
            self.emit(report.into());
        }

        self.history.evict_older_than(evict_from, self.window);

        if let Some(alert) = self.alert.evaluate(now, self.history.running_hits()) {
            self.stats.alerts += 1;
            self.emit(alert.into());
        }
    }

    fn emit(&mut self, event: MonitorEvent) {
        self.sink.emit(&event);
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn alert(&self) -> &AlertMonitor {
        &self.alert
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }
}
