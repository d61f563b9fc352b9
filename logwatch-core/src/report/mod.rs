//! Fixed-cadence traffic digests.
//!
//! The cadence is measured in event time. The [`Reporter`] holds a cursor (the event time of the
//! last report, or of the first record) and fires once `now - cursor` reaches the interval. The
//! digest ends at the newest bucket strictly older than `now`, so the record that triggered the
//! report is never part of it, and reaches back `interval` seconds inclusive. It never reaches
//! back past the last bucket already reported, so no second is counted twice.
//!
//! While input is stalled the monitor drives [`Reporter::observe_idle`] with an event time
//! extrapolated from real time. Idle firings keep their own cursor and never move the record
//! cursor past the newest record.

use crate::history::{HistoryStore, IntervalSummary};
use serde::Serialize;


pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficReport {
    /// Last second covered by the report.
    pub ts: i64,
    pub hits: u64,
    pub hosts: usize,
    pub bytes: i64,
    /// Sections tied for the most hits, lexicographic order.
    pub top_sections: Vec<String>,
    pub top_hits: u64,
}

impl TrafficReport {
    pub fn from_summary(summary: &IntervalSummary) -> Self {
        let (top_sections, top_hits) = summary.top_sections();
        Self {
            ts: summary.boundary,
            hits: summary.hits,
            hosts: summary.hosts.len(),
            bytes: summary.bytes,
            top_sections,
            top_hits,
        }
    }

    /// `api and report`, or `-` for an interval without traffic.
    pub fn top_label(&self) -> String {
        if self.top_sections.is_empty() {
            "-".to_string()
        } else {
            self.top_sections.join(" and ")
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reporter {
    interval: u64,
    cursor: Option<i64>,
    idle_cursor: Option<i64>,
    last_reported: Option<i64>,
}

impl Reporter {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            cursor: None,
            idle_cursor: None,
            last_reported: None,
        }
    }

    pub fn cursor(&self) -> Option<i64> {
        self.cursor
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Newest bucket covered by a report so far.
    pub fn last_reported(&self) -> Option<i64> {
        self.last_reported
    }

    /// Advance to the event time `now` of a processed record, producing a report when the
    /// interval has elapsed.
    pub fn observe(&mut self, now: i64, history: &HistoryStore) -> Option<TrafficReport> {
        self.idle_cursor = None;

        let Some(cursor) = self.cursor else {
            self.cursor = Some(now);
            return None;
        };

        if now.saturating_sub(cursor) < self.interval as i64 {
            return None;
        }

        self.cursor = Some(now);
        Some(self.close(now, history))
    }

    /// Advance to an extrapolated event time `now` while no records arrive.
    ///
    /// `latest` is the newest record timestamp. The record cursor moves at most up to it.
    pub fn observe_idle(
        &mut self,
        now: i64,
        latest: i64,
        history: &HistoryStore,
    ) -> Option<TrafficReport> {
        let base = self.idle_cursor.or(self.cursor)?;
        if now.saturating_sub(base) < self.interval as i64 {
            return None;
        }

        self.idle_cursor = Some(now);
        self.cursor = self.cursor.map(|cursor| cursor.max(latest));
        Some(self.close(now, history))
    }

    fn close(&mut self, now: i64, history: &HistoryStore) -> TrafficReport {
        let fresh = history
            .latest_bucket_before(now)
            .filter(|ts| self.last_reported.is_none_or(|last| *ts > last));
        let boundary = fresh.unwrap_or_else(|| now.saturating_sub(1));

        let mut start = boundary.saturating_sub(self.interval as i64);
        if let Some(last) = self.last_reported {
            start = start.max(last.saturating_add(1));
        }

        let summary = history.sum_between(start, boundary);
        if fresh.is_some() {
            self.last_reported = Some(boundary);
        }

        tracing::debug!(
            start,
            boundary,
            hits = summary.hits,
            now,
            "report interval closed"
        );

        TrafficReport::from_summary(&summary)
    }
}
