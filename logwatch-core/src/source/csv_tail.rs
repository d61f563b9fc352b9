use super::{RawRecord, RecordSource, SourceError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Stdin};
use std::path::Path;

/// Follows a CSV stream line by line, like `tail -f`.
///
/// End of input is not the end of the stream: it yields [`SourceError::NoData`] and the next
/// pull reads whatever was appended since. A line without its trailing newline is held back
/// until the rest of it arrives.
pub struct CsvTailSource<R> {
    reader: R,
    pending: Vec<u8>,
}

impl<R: BufRead> CsvTailSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    fn next_line(&mut self) -> Result<Vec<u8>, SourceError> {
        loop {
            self.reader.read_until(b'\n', &mut self.pending)?;

            if !self.pending.ends_with(b"\n") {
                return Err(SourceError::NoData);
            }

            let line = std::mem::take(&mut self.pending);
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            return Ok(line);
        }
    }
}

impl CsvTailSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl CsvTailSource<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead + Send + 'static> RecordSource for CsvTailSource<R> {
    fn next_record(&mut self) -> Result<RawRecord, SourceError> {
        let line = self.next_line()?;
        parse_csv_line(&line)
    }
}

/// Split one CSV line into fields. Quoting follows RFC 4180; the field count is not checked.
pub(crate) fn parse_csv_line(line: &[u8]) -> Result<RawRecord, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line);

    let mut record = csv::StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(Vec::new());
    }
    Ok(record.iter().map(str::to_string).collect())
}
