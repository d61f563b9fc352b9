use super::Bucket;
use std::collections::{HashMap, HashSet};

/// Read-only aggregate over a run of buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSummary {
    /// Last second covered (inclusive).
    pub boundary: i64,
    pub hits: u64,
    pub bytes: i64,
    pub hosts: HashSet<String>,
    pub sections: HashMap<String, u64>,
}

impl IntervalSummary {
    pub(crate) fn new(boundary: i64) -> Self {
        Self {
            boundary,
            hits: 0,
            bytes: 0,
            hosts: HashSet::new(),
            sections: HashMap::new(),
        }
    }

    pub(crate) fn merge(&mut self, bucket: &Bucket) {
        self.hits += bucket.hits;
        self.bytes += bucket.bytes;
        for (section, hits) in &bucket.sections {
            *self.sections.entry(section.clone()).or_insert(0) += hits;
        }
        self.hosts.extend(bucket.hosts.iter().cloned());
    }

    /// Sections sharing the highest hit count, sorted lexicographically, and that count.
    ///
    /// Empty when the interval saw no traffic.
    pub fn top_sections(&self) -> (Vec<String>, u64) {
        let Some(max) = self.sections.values().copied().max() else {
            return (Vec::new(), 0);
        };

        let mut top: Vec<String> = self
            .sections
            .iter()
            .filter(|(_, hits)| **hits == max)
            .map(|(section, _)| section.clone())
            .collect();
        top.sort();

        (top, max)
    }
}
