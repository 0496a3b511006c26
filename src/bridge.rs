// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend for the [`log`] facade.
//!
//! Libraries that log through the `log` crate can be routed into the global logger, so that
//! their records are filtered and rendered like everyone else's. The record's module path
//! stands in for the function name, which `log` does not provide.
//!
//! | `log` level | scopelog level |
//! |-------------|----------------|
//! | `Error`     | `Error`        |
//! | `Warn`      | `Warning`      |
//! | `Info`      | `Info`         |
//! | `Debug`     | `Debug`        |
//! | `Trace`     | `XDebug`       |
//!
//! ```rust
//! scopelog::bridge::init().unwrap();
//! log::error!("routed through scopelog");
//! ```

use crate::global_logger::with_logger;
use crate::{Level, Location};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LogBridge;

impl LogBridge {
    pub const fn new() -> Self {
        LogBridge
    }

    pub const fn level(level: log::Level) -> Level {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::XDebug,
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let level = Self::level(metadata.level());
        level.is_built_in() && with_logger(|logger| level <= logger.threshold())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let location = Location::new(
            record.file().unwrap_or_default(),
            record.module_path().unwrap_or(record.target()),
            record.line().unwrap_or(0),
        );
        let level = Self::level(record.level());
        with_logger(|logger| {
            let _ = logger.log(level, record.args(), &location);
        });
    }

    fn flush(&self) {
        let _ = with_logger(|logger| logger.sink().flush());
    }
}

static BRIDGE: LogBridge = LogBridge::new();

/// Installs [LogBridge] as the `log` backend and lets every level through to it.
///
/// Fails if another backend is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&BRIDGE)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
