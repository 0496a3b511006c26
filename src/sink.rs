// SPDX-License-Identifier: MIT OR Apache-2.0

//! Where rendered records go.
//!
//! The logger holds one [`Sink`] and hands it every record that passes the scope check,
//! flushing after each one. Buffering, rotation and lifetime of the underlying stream are the
//! sink's business.
//!
//! - [`StderrSink`] writes to standard error (the browser console on wasm32).
//! - [`FileSink`] appends to a file.
//! - [`InMemorySink`] keeps records in memory, for tests and for environments without a
//!   usable stderr.
//!
//! ```rust
//! use scopelog::sink::{InMemorySink, Sink};
//! use scopelog::{Level, LogRecord};
//!
//! let sink = InMemorySink::new();
//! sink.write_record(&LogRecord::new(Level::Info, "one\n")).unwrap();
//! sink.write_record(&LogRecord::new(Level::Info, "two\n")).unwrap();
//! assert_eq!(sink.drain_logs(), "one\ntwo\n");
//! assert_eq!(sink.drain_logs(), "");
//! ```

use crate::log_record::LogRecord;
use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

pub trait Sink: Debug + Send + Sync {
    /**
        Writes one rendered record.
    */
    fn write_record(&self, record: &LogRecord) -> io::Result<()>;

    /**
    Pushes buffered output to its destination.
    */
    fn flush(&self) -> io::Result<()>;
}

/**
A sink that writes to stderr.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StderrSink;

impl StderrSink {
    pub const fn new() -> Self {
        StderrSink
    }
}

impl Sink for StderrSink {
    fn write_record(&self, record: &LogRecord) -> io::Result<()> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::io::stderr().lock().write_all(record.text().as_bytes())
        }
        #[cfg(target_arch = "wasm32")]
        {
            use crate::Level;
            let msg = wasm_bindgen::JsValue::from_str(record.text().trim_end_matches('\n'));
            match record.level() {
                Level::Critical | Level::Error => web_sys::console::error_1(&msg),
                Level::Warning => web_sys::console::warn_1(&msg),
                Level::Progress | Level::Note | Level::Info => web_sys::console::info_1(&msg),
                Level::Debug | Level::XDebug => web_sys::console::debug_1(&msg),
            }
            Ok(())
        }
    }

    fn flush(&self) -> io::Result<()> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::io::stderr().flush()
        }
        #[cfg(target_arch = "wasm32")]
        {
            Ok(())
        }
    }
}

/// A sink that appends to a file.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Opens `path` for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileSink::from_file(file))
    }

    pub fn from_file(file: File) -> Self {
        FileSink {
            file: Mutex::new(file),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, File> {
        // a poisoned file is still a valid file
        self.file.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Sink for FileSink {
    fn write_record(&self, record: &LogRecord) -> io::Result<()> {
        self.lock().write_all(record.text().as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// A sink that stores rendered records in memory.
///
/// ```rust
/// use scopelog::sink::InMemorySink;
/// use scopelog::{Level, Location, Logger};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let mut logger = Logger::new();
/// logger.set_sink(sink.clone());
/// logger.set_log_format("{level}: {msg}\n");
/// logger.set_level_style(Level::Error, scopelog::style::Style::none());
///
/// logger.log(Level::Error, "disk full", &Location::new("a.rs", "main", 1)).unwrap();
/// assert_eq!(sink.drain_logs(), "Error: disk full\n");
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    logs: Mutex<Vec<LogRecord>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug, Default: derived (empty buffer)
// - Clone: NOT implemented - two handles to "the same" buffer should share an Arc instead
// - PartialEq/Eq/Hash: NOT implemented - comparing mutex contents is not meaningful

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Concatenates and clears the stored records.
    pub fn drain_logs(&self) -> String {
        let mut logs = self.lock();
        let result = logs.iter().map(LogRecord::text).collect();
        logs.clear();
        result
    }

    /// Removes and returns the stored records.
    pub fn drain_records(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Writes the stored records to stderr and clears them.
    pub fn drain_to_console(&self) -> io::Result<()> {
        let records = self.drain_records();
        let stderr = StderrSink::new();
        for record in &records {
            stderr.write_record(record)?;
        }
        stderr.flush()
    }
}

impl Sink for InMemorySink {
    fn write_record(&self, record: &LogRecord) -> io::Result<()> {
        self.lock().push(record.clone());
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
