//! Second-resolution traffic history.
//!
//! One [`Bucket`] per second of event time that saw at least one hit. Buckets live until their
//! age, measured against the newest record seen, exceeds the retention window. Wall-clock time
//! never enters this module, so replaying an old log behaves exactly like tailing a live one.

mod summary;


pub use summary::IntervalSummary;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

/// Aggregate counters for every hit in one second of event time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    pub hits: u64,
    pub bytes: i64,
    pub sections: HashMap<String, u64>,
    pub hosts: HashSet<String>,
}

impl Bucket {
    fn add(&mut self, section: &str, host: &str, bytes: i64) {
        self.hits += 1;
        self.bytes += bytes;
        *self.sections.entry(section.to_string()).or_insert(0) += 1;
        if !self.hosts.contains(host) {
            self.hosts.insert(host.to_string());
        }
    }
}

/// Buckets keyed by unix second, plus the running hit total across all of them.
///
/// `running_hits` is maintained on insert and eviction and always equals the sum of `hits`
/// over the retained buckets.
#[derive(Debug, Default)]
pub struct HistoryStore {
    buckets: BTreeMap<i64, Bucket>,
    running_hits: u64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, ts: i64, section: &str, host: &str, bytes: i64) {
        self.buckets
            .entry(ts)
            .or_default()
            .add(section, host, bytes);
        self.running_hits += 1;
    }

    /// Drop every bucket whose age relative to `latest_ts` exceeds `window`.
    ///
    /// Returns the number of buckets removed.
    pub fn evict_older_than(&mut self, latest_ts: i64, window: Duration) -> usize {
        // age > window  <=>  ts < latest_ts - window
        let cutoff = (latest_ts as f64 - window.as_secs_f64()).ceil() as i64;

        let retained = self.buckets.split_off(&cutoff);
        let evicted = std::mem::replace(&mut self.buckets, retained);

        let evicted_hits: u64 = evicted.values().map(|b| b.hits).sum();
        self.running_hits -= evicted_hits;

        if !evicted.is_empty() {
            tracing::trace!(
                latest_ts,
                evicted = evicted.len(),
                evicted_hits,
                running_hits = self.running_hits,
                "evicted stale buckets"
            );
        }

        evicted.len()
    }

    /// Aggregate of the buckets in `[boundary - interval, boundary]`.
    pub fn sum_over_interval(&self, boundary: i64, interval: u64) -> IntervalSummary {
        self.sum_between(boundary.saturating_sub(interval as i64), boundary)
    }

    /// Aggregate of the buckets in `[start, boundary]`, labelled with `boundary`.
    pub fn sum_between(&self, start: i64, boundary: i64) -> IntervalSummary {
        let mut summary = IntervalSummary::new(boundary);
        if start > boundary {
            return summary;
        }

        for bucket in self.buckets.range(start..=boundary).map(|(_, b)| b) {
            summary.merge(bucket);
        }
        summary
    }

    /// Timestamp of the newest bucket strictly older than `ts`.
    pub fn latest_bucket_before(&self, ts: i64) -> Option<i64> {
        self.buckets.range(..ts).next_back().map(|(k, _)| *k)
    }

    pub fn running_hits(&self) -> u64 {
        self.running_hits
    }

    pub fn bucket(&self, ts: i64) -> Option<&Bucket> {
        self.buckets.get(&ts)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (i64, &Bucket)> {
        self.buckets.iter().map(|(ts, b)| (*ts, b))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
