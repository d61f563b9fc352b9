//! Record sources.
//!
//! A source is pulled one record at a time from a dedicated reader thread. It distinguishes
//! "nothing to read right now" ([`SourceError::NoData`]) from a failed read; the former makes
//! the reader back off and retry, the latter only loses the record at hand.

mod csv_tail;

#[cfg(test)]
mod tests;

pub use csv_tail::CsvTailSource;

use thiserror::Error;

/// One unparsed record, field by field.
pub type RawRecord = Vec<String>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no data available yet")]
    NoData,

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed csv line: {0}")]
    Csv(#[from] csv::Error),
}

pub trait RecordSource: Send + 'static {
    fn next_record(&mut self) -> Result<RawRecord, SourceError>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn next_record(&mut self) -> Result<RawRecord, SourceError> {
        (**self).next_record()
    }
}
