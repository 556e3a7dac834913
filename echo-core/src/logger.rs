//! Structured JSON-lines logger.
//!
//! Each call writes one record of the form
//! `{"level":"INFO","message":"...","timestamp":"...","data":{...}}` followed
//! by a newline. `data` is left out of the record when no payload is given.
//! The logger is built once by the host and handed to the handler; there is
//! no global instance.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clock::{Clock, SystemClock};

/// Free-form payload attached to a log record.
pub type LogData = Map<String, Value>;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log record as written to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LogData>,
}

/// Turn a JSON value into a log payload.
///
/// Objects are used as-is; any other value is stored under the key `value`.
pub fn payload(value: Value) -> LogData {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

/// Logger that writes one JSON record per call to a shared sink.
pub struct StructuredLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    clock: Arc<dyn Clock>,
}

impl StructuredLogger {
    /// Create a logger writing to the given sink.
    pub fn new<W>(sink: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Mutex::new(Box::new(sink)),
            clock: Arc::new(SystemClock),
        }
    }

    /// Logger writing to process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Logger writing to process stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Logger that discards every record.
    pub fn discard() -> Self {
        Self::new(io::sink())
    }

    /// Replace the clock used to stamp records.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn info(&self, message: &str, data: Option<LogData>) {
        self.log(LogLevel::Info, message, data);
    }

    pub fn warn(&self, message: &str, data: Option<LogData>) {
        self.log(LogLevel::Warn, message, data);
    }

    pub fn error(&self, message: &str, data: Option<LogData>) {
        self.log(LogLevel::Error, message, data);
    }

    /// Write one record. Never fails from the caller's point of view.
    pub fn log(&self, level: LogLevel, message: &str, data: Option<LogData>) {
        let entry = LogEntry {
            level,
            message: message.to_string(),
            timestamp: self.clock.timestamp(),
            data,
        };

        let mut line = render_line(&entry);
        line.push('\n');
        self.write_line(&line);
    }

    fn write_line(&self, line: &str) {
        // A panic while holding the lock leaves the sink usable.
        let mut sink = self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Err(e) = sink.write_all(line.as_bytes()).and_then(|_| sink.flush()) {
            tracing::warn!("Failed to write log record: {}", e);
        }
    }
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger").finish_non_exhaustive()
    }
}

fn render_line(entry: &LogEntry) -> String {
    match serde_json::to_string(entry) {
        Ok(json) => json,
        Err(e) => {
            tracing::debug!("Falling back to plain log line: {}", e);
            render_plain(entry)
        }
    }
}

/// Plain-text rendering used when the record cannot be encoded as JSON.
fn render_plain(entry: &LogEntry) -> String {
    let data = match &entry.data {
        Some(data) => format!("{:?}", data),
        None => "{}".to_string(),
    };

    format!("{} [{}] {}: {}", entry.timestamp, entry.level, entry.message, data)
}

/// In-memory sink that keeps everything written to it.
///
/// Clones share the same buffer, so one clone can be handed to a logger and
/// the other kept to read the records back.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Written lines, without their trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Written lines parsed back into log entries. Lines that are not JSON
    /// records are skipped.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
