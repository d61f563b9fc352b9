//! Output side of the monitor.
//!
//! Sinks are expected to be fast. The monitor calls [`EventSink::emit`] inline from its loop and
//! never buffers on a sink's behalf.

use crate::event::MonitorEvent;
use clap::ValueEnum;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

pub trait EventSink: Send {
    fn emit(&mut self, event: &MonitorEvent);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One human-readable line per event.
pub struct TextSink<W> {
    out: W,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> EventSink for TextSink<W> {
    fn emit(&mut self, event: &MonitorEvent) {
        let result = writeln!(self.out, "{event}").and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write event");
        }
    }
}

/// One JSON object per line.
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> EventSink for JsonSink<W> {
    fn emit(&mut self, event: &MonitorEvent) {
        let result = serde_json::to_writer(&mut self.out, event)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(self.out))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to write event");
        }
    }
}

/// Collects events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<MonitorEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MonitorEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &MonitorEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &MonitorEvent) {
        (**self).emit(event)
    }
}

pub fn stdout_sink(format: OutputFormat) -> Box<dyn EventSink> {
    match format {
        OutputFormat::Text => Box::new(TextSink::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonSink::new(io::stdout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TrafficReport;
    use pretty_assertions::assert_eq;

    fn report() -> MonitorEvent {
        MonitorEvent::Report(TrafficReport {
            ts: 0,
            hits: 1,
            hosts: 1,
            bytes: 10,
            top_sections: vec!["api".into()],
            top_hits: 1,
        })
    }

    #[test]
    fn text_sink_writes_one_line_per_event() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&report());
        sink.emit(&report());

        let out = String::from_utf8(sink.out).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.starts_with("1970-01-01 00:00:00 UTC: 1 hits"));
    }

    #[test]
    fn json_sink_writes_json_lines() {
        let mut sink = JsonSink::new(Vec::new());
        sink.emit(&report());

        let out = String::from_utf8(sink.out).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["kind"], "report");
        assert_eq!(value["top_sections"][0], "api");
    }

    #[test]
    fn memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.emit(&report());

        assert_eq!(sink.events(), vec![report()]);
    }
}
