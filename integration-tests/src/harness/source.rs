use logwatch_core::source::{RawRecord, RecordSource, SourceError};
use std::collections::VecDeque;

/// Yields a fixed list of raw records, then reports "no data" forever.
pub struct ScriptedSource {
    records: VecDeque<RawRecord>,
}

impl ScriptedSource {
    pub fn new(records: impl IntoIterator<Item = RawRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }
}

impl RecordSource for ScriptedSource {
    fn next_record(&mut self) -> Result<RawRecord, SourceError> {
        self.records.pop_front().ok_or(SourceError::NoData)
    }
}
