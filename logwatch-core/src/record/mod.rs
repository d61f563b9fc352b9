//! Access-log records.
//!
//! A raw record is the 7-field tuple produced by the source:
//!
//! remotehost, rfc931, authuser, date (unix seconds), request line, status, bytes
//!
//! Parsing is all-or-nothing. Anything that does not fit the shape is rejected and the caller
//! drops it; the feed is allowed to interleave headers, partial writes and garbage.

use thiserror::Error;


pub const FIELD_COUNT: usize = 7;

/// One validated access-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub remote_host: String,
    pub rfc931: String,
    pub auth_user: String,
    /// Event time, unix seconds.
    pub timestamp: i64,
    pub request: String,
    pub section: String,
    pub status: i64,
    pub bytes: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected {FIELD_COUNT} fields, got {found}")]
    FieldCount { found: usize },

    #[error("invalid {field} '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("request line '{request}' has no path section")]
    NoSection { request: String },
}

impl RecordError {
    fn not_a_number(field: &'static str, value: &str) -> Self {
        Self::NotANumber {
            field,
            value: value.to_string(),
        }
    }
}

impl Record {
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, RecordError> {
        let [host, rfc931, auth_user, date, request, status, bytes] = raw else {
            return Err(RecordError::FieldCount { found: raw.len() });
        };

        let bytes = bytes.as_ref();
        let bytes = bytes
            .trim()
            .parse::<i64>()
            .map_err(|_| RecordError::not_a_number("bytes", bytes))?;

        let status = status.as_ref();
        let status = status
            .trim()
            .parse::<i64>()
            .map_err(|_| RecordError::not_a_number("status", status))?;

        let date = date.as_ref();
        let timestamp = date
            .trim()
            .parse::<i64>()
            .map_err(|_| RecordError::not_a_number("date", date))?;

        let request = request.as_ref();
        let Some(section) = section_of(request) else {
            return Err(RecordError::NoSection {
                request: request.to_string(),
            });
        };

        Ok(Self {
            remote_host: host.as_ref().to_string(),
            rfc931: rfc931.as_ref().to_string(),
            auth_user: auth_user.as_ref().to_string(),
            timestamp,
            request: request.to_string(),
            section: section.to_string(),
            status,
            bytes,
        })
    }
}

/// Rejection-as-`None` form used by the ingestion loop.
pub fn parse_record<S: AsRef<str>>(raw: &[S]) -> Option<Record> {
    match Record::parse(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::trace!(error = %e, "record dropped");
            None
        }
    }
}

/// First non-empty path segment of `METHOD /path/... PROTOCOL`.
///
/// `GET /api/user HTTP/1.0` gives `api`. Query strings and fragments are not part of a section.
pub fn section_of(request: &str) -> Option<&str> {
    let mut parts = request.split_whitespace();
    let _method = parts.next()?;
    let path = parts.next()?;
    if !path.starts_with('/') {
        return None;
    }

    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').find(|segment| !segment.is_empty())
}
