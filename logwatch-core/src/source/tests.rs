use super::csv_tail::parse_csv_line;
use super::*;
use pretty_assertions::assert_eq;
use std::fs::OpenOptions;
use std::io::{Cursor, Write};

const LINE: &str = "\"10.0.0.2\",\"-\",\"apache\",1549573860,\"GET /api/user HTTP/1.0\",200,1234\n";

fn fields() -> RawRecord {
    [
        "10.0.0.2",
        "-",
        "apache",
        "1549573860",
        "GET /api/user HTTP/1.0",
        "200",
        "1234",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[test]
fn parses_quoted_fields() {
    assert_eq!(parse_csv_line(LINE.as_bytes()).unwrap(), fields());
}

#[test]
fn keeps_embedded_commas_inside_quotes() {
    let raw = parse_csv_line(b"a,\"b,c\",d\n").unwrap();
    assert_eq!(raw, vec!["a", "b,c", "d"]);
}

#[test]
fn reports_no_data_at_end_of_input() {
    let mut source = CsvTailSource::new(Cursor::new(LINE.as_bytes().to_vec()));

    assert_eq!(source.next_record().unwrap(), fields());
    assert!(matches!(source.next_record(), Err(SourceError::NoData)));
    assert!(matches!(source.next_record(), Err(SourceError::NoData)));
}

#[test]
fn skips_blank_lines() {
    let input = format!("\n  \n{LINE}\r\n{LINE}");
    let mut source = CsvTailSource::new(Cursor::new(input.into_bytes()));

    assert_eq!(source.next_record().unwrap(), fields());
    assert_eq!(source.next_record().unwrap(), fields());
    assert!(matches!(source.next_record(), Err(SourceError::NoData)));
}

#[test]
fn follows_appended_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.csv");
    std::fs::write(&path, "").unwrap();

    let mut source = CsvTailSource::open(&path).unwrap();
    assert!(matches!(source.next_record(), Err(SourceError::NoData)));

    let mut writer = OpenOptions::new().append(true).open(&path).unwrap();

    // half a line is held back
    let (head, tail) = LINE.split_at(20);
    writer.write_all(head.as_bytes()).unwrap();
    writer.flush().unwrap();
    assert!(matches!(source.next_record(), Err(SourceError::NoData)));

    writer.write_all(tail.as_bytes()).unwrap();
    writer.flush().unwrap();
    assert_eq!(source.next_record().unwrap(), fields());
    assert!(matches!(source.next_record(), Err(SourceError::NoData)));
}
