// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide logger.
//!
//! The macros all go through one [`Logger`] shared by the whole program. It is created with
//! default settings on first use and can be reconfigured in place with [`with_logger_mut`] or
//! replaced outright with [`set_logger`].
//!
//! # Locking
//!
//! The logger sits behind a reader/writer spinlock rather than a `Mutex`, so logging also works
//! on the wasm main thread. Log calls take the read side and may run concurrently;
//! configuration takes the write side. Do not reconfigure the logger from inside a closure
//! passed to [`with_logger`]: the write side would wait for a read lock its own thread holds.
//!
//! # Examples
//!
//! ```
//! use scopelog::global_logger::{with_logger, with_logger_mut};
//! use scopelog::Level;
//!
//! with_logger_mut(|logger| {
//!     logger.set_threshold(Level::Info);
//!     logger.set_func_filter("^(main|setup)$").unwrap();
//! });
//! assert_eq!(with_logger(|logger| logger.threshold()), Level::Info);
//! ```
//!
//! ```
//! use scopelog::global_logger::{set_logger, with_logger};
//! use scopelog::sink::InMemorySink;
//! use scopelog::Logger;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let mut logger = Logger::new();
//! logger.set_sink(sink.clone());
//! set_logger(logger);
//! assert!(with_logger(|logger| logger.sink().flush()).is_ok());
//! ```

use crate::logger::Logger;
use crate::spinlock::Spinlock;
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Spinlock<Logger>> = OnceLock::new();

/// Serializes unit tests that install a global logger.
#[cfg(test)]
pub(crate) static TEST_LOGGER_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn global() -> &'static Spinlock<Logger> {
    GLOBAL_LOGGER.get_or_init(|| Spinlock::new(Logger::new()))
}

/// Runs `f` with shared access to the global logger.
pub fn with_logger<F, R>(f: F) -> R
where
    F: FnOnce(&Logger) -> R,
{
    global().with(f)
}

/// Runs `f` with exclusive access to the global logger.
pub fn with_logger_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Logger) -> R,
{
    global().with_mut(f)
}

/// Replaces the global logger, returning the previous one.
pub fn set_logger(logger: Logger) -> Logger {
    with_logger_mut(|current| std::mem::replace(current, logger))
}
