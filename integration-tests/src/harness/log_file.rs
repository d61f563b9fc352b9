use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One access-log line in the quoted CSV layout.
pub fn csv_line(host: &str, ts: i64, section: &str, status: i64, bytes: i64) -> String {
    format!("\"{host}\",\"-\",\"apache\",{ts},\"GET /{section}/item HTTP/1.0\",{status},{bytes}\n")
}

/// A CSV access log in a temp directory that tests append to while the monitor follows it.
pub struct LogFile {
    _dir: TempDir,
    path: PathBuf,
    file: File,
}

impl LogFile {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("access.csv");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .expect("failed to create log file");

        Self {
            _dir: dir,
            path,
            file,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&mut self) -> &mut Self {
        self.append("\"remotehost\",\"rfc931\",\"authuser\",\"date\",\"request\",\"status\",\"bytes\"\n")
    }

    pub fn hit(&mut self, ts: i64, section: &str) -> &mut Self {
        let line = csv_line("10.0.0.1", ts, section, 200, 1234);
        self.append(&line)
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.file
            .write_all(text.as_bytes())
            .expect("failed to append to log file");
        self.file.flush().expect("failed to flush log file");
        self
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self::new()
    }
}
