//! Shared helpers for the integration tests
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use exodb::SchemaCatalog;

/// Log sink collecting formatted events in memory
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    pub fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Number of events at `level` whose line contains `needle`
    pub fn count(&self, level: &str, needle: &str) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.contains(level) && line.contains(needle))
            .count()
    }
}

/// Run `f` with a subscriber that records every event at DEBUG and above
pub fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs)
}

/// In-memory catalog standing in for a live server
pub struct MemoryCatalog {
    pub tables: Vec<String>,
    pub routines: Vec<String>,
    pub table_queries: usize,
    pub routine_queries: Vec<String>,
}

impl MemoryCatalog {
    pub fn new(tables: &[&str], routines: &[&str]) -> Self {
        Self {
            tables: tables.iter().map(|s| s.to_string()).collect(),
            routines: routines.iter().map(|s| s.to_string()).collect(),
            table_queries: 0,
            routine_queries: Vec::new(),
        }
    }
}

impl SchemaCatalog for MemoryCatalog {
    fn table_names(&mut self) -> Result<Vec<String>, mysql::Error> {
        self.table_queries += 1;
        Ok(self.tables.clone())
    }

    fn routine_names(&mut self, schema: &str) -> Result<Vec<String>, mysql::Error> {
        self.routine_queries.push(schema.to_string());
        Ok(self.routines.clone())
    }
}

/// Catalog whose queries fail as if the connection dropped
pub struct BrokenCatalog;

impl SchemaCatalog for BrokenCatalog {
    fn table_names(&mut self) -> Result<Vec<String>, mysql::Error> {
        Err(mysql::Error::IoError(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "server closed the connection",
        )))
    }

    fn routine_names(&mut self, _schema: &str) -> Result<Vec<String>, mysql::Error> {
        Err(mysql::Error::IoError(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "server closed the connection",
        )))
    }
}
