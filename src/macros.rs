// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging macros.
//!
//! The macros capture the call site with [`here!`](crate::here) and send the message through the
//! [global logger](crate::global_logger). The message arguments are only formatted when the
//! call is in scope.
//!
//! Levels more verbose than [`Progress`](crate::Level::Progress) are compiled out of release
//! builds unless the `always-on` feature is enabled; see [`Level::is_built_in`].
//!
//! ```rust
//! use scopelog::Level;
//!
//! scopelog::global_logger::with_logger_mut(|logger| logger.set_threshold(Level::Info));
//!
//! let retries = 3;
//! scopelog::warning!("giving up after {retries} retries");
//! scopelog::log!(Level::Info, "{} items left", 7);
//!
//! let stats = scopelog::in_scope!(Level::Debug, {
//!     // only runs when a Debug call here would be logged
//!     (0..1000).sum::<u32>()
//! });
//! assert_eq!(stats, None);
//! ```
//!
//! [`Level::is_built_in`]: crate::Level::is_built_in

/**
Logs a message at the given level, with `format!`-style arguments.

Errors from the sink are discarded.
*/
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        if level.is_built_in() {
            let location = $crate::here!();
            $crate::global_logger::with_logger(|logger| {
                let _ = logger.log(level, format_args!($($arg)+), &location);
            });
        }
    }};
}

/**
Logs a message whose displayed depth is shifted by `delta`.

The depth limit still applies to the real depth.

```rust
scopelog::log_at_depth!(scopelog::Level::Error, 2, "nested {}", "step");
```
*/
#[macro_export]
macro_rules! log_at_depth {
    ($level:expr, $delta:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        if level.is_built_in() {
            let location = $crate::here!();
            let delta: usize = $delta;
            $crate::global_logger::with_logger(|logger| {
                let _ = logger.log_at_depth(level, format_args!($($arg)+), &location, delta);
            });
        }
    }};
}

/// Logs at [Critical](crate::Level::Critical).
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Critical, $($arg)+) };
}

/// Logs at [Error](crate::Level::Error).
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Error, $($arg)+) };
}

/// Logs at [Warning](crate::Level::Warning).
#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Warning, $($arg)+) };
}

/// Logs at [Progress](crate::Level::Progress).
#[macro_export]
macro_rules! progress {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Progress, $($arg)+) };
}

/// Logs at [Note](crate::Level::Note).
#[macro_export]
macro_rules! note {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Note, $($arg)+) };
}

/// Logs at [Info](crate::Level::Info).
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Info, $($arg)+) };
}

/// Logs at [Debug](crate::Level::Debug).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log!($crate::Level::Debug, $($arg)+) };
}

/// Logs at [XDebug](crate::Level::XDebug).
#[macro_export]
macro_rules! xdebug {
    ($($arg:tt)+) => { $crate::log!($crate::Level::XDebug, $($arg)+) };
}

/**
Dumps a collection to a file of its own, if the call site is in scope.

Evaluates to `scopelog::Result<Option<PathBuf>>`: the path written, or `None` when out of scope.
The file name defaults to [`DEFAULT_DUMP_FILENAME`](crate::logger::DEFAULT_DUMP_FILENAME) and
the separator to a newline.

```rust,no_run
use scopelog::Level;

let samples = vec![0.5, 0.25, 0.125];
let written = scopelog::dump!(Level::Error, &samples, "samples_{n}.csv", ",").unwrap();
if let Some(path) = written {
    println!("wrote {}", path.display());
}
```
*/
#[macro_export]
macro_rules! dump {
    ($level:expr, $items:expr) => {
        $crate::dump!(
            $level,
            $items,
            $crate::logger::DEFAULT_DUMP_FILENAME,
            $crate::logger::DEFAULT_DUMP_SEPARATOR
        )
    };
    ($level:expr, $items:expr, $filename:expr) => {
        $crate::dump!(
            $level,
            $items,
            $filename,
            $crate::logger::DEFAULT_DUMP_SEPARATOR
        )
    };
    ($level:expr, $items:expr, $filename:expr, $sep:expr) => {{
        let level: $crate::Level = $level;
        if level.is_built_in() {
            let location = $crate::here!();
            $crate::global_logger::with_logger(|logger| {
                logger.dump(level, $items, &location, $filename, $sep)
            })
        } else {
            ::std::result::Result::Ok(::std::option::Option::None)
        }
    }};
}

/**
Evaluates `body` only if a call at `level` would be logged here; yields `Option` of its value.

The body runs in the caller's frame, outside any lock, so it may log, use `?` or `return`.
*/
#[macro_export]
macro_rules! in_scope {
    ($level:expr, $body:expr) => {{
        let level: $crate::Level = $level;
        let location = $crate::here!();
        if level.is_built_in()
            && $crate::global_logger::with_logger(|logger| logger.locate(level, &location).matches)
        {
            ::std::option::Option::Some($body)
        } else {
            ::std::option::Option::None
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::global_logger::{set_logger, TEST_LOGGER_GUARD};
    use crate::sink::InMemorySink;
    use crate::{Level, Logger};
    use std::sync::Arc;

    fn capture(template: &str, threshold: Level) -> Arc<InMemorySink> {
        let sink = Arc::new(InMemorySink::new());
        let mut logger = Logger::new();
        logger.set_sink(sink.clone());
        logger.set_log_format(template);
        logger.set_threshold(threshold);
        for level in Level::ALL {
            logger.set_level_style(level, crate::style::Style::none());
        }
        set_logger(logger);
        sink
    }

    #[test]
    fn macros_capture_the_call_site() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let sink = capture("{level_letter} {func} {file} {msg}\n", Level::Debug);
        crate::debug!("x = {}", 4);
        crate::xdebug!("too verbose");
        assert_eq!(
            sink.drain_logs(),
            "D macros_capture_the_call_site src/macros.rs x = 4\n"
        );
        set_logger(Logger::new());
    }

    #[test]
    fn every_level_macro_uses_its_level() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let sink = capture("{level_short} ", Level::XDebug);
        crate::critical!("m");
        crate::error!("m");
        crate::warning!("m");
        crate::progress!("m");
        crate::note!("m");
        crate::info!("m");
        crate::debug!("m");
        crate::xdebug!("m");
        assert_eq!(
            sink.drain_logs(),
            "Crit Erro Warn Prog Note Info Dbug XDbg "
        );
        set_logger(Logger::new());
    }

    #[test]
    fn arguments_are_not_formatted_out_of_scope() {
        struct Loud;
        impl std::fmt::Display for Loud {
            fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                panic!("formatted an out-of-scope message");
            }
        }
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let sink = capture("{msg}", Level::Error);
        crate::info!("{}", Loud);
        assert!(sink.is_empty());
        set_logger(Logger::new());
    }

    #[test]
    fn in_scope_body_runs_in_caller() {
        fn probe(threshold: Level) -> Option<u32> {
            let _guard = TEST_LOGGER_GUARD.lock().unwrap();
            capture("{msg}", threshold);
            let value = crate::in_scope!(Level::Note, {
                let v = "21".parse::<u32>().ok()?;
                v * 2
            });
            set_logger(Logger::new());
            value
        }
        assert_eq!(probe(Level::Info), Some(42));
        assert_eq!(probe(Level::Warning), None);
    }

    #[test]
    fn log_at_depth_shifts_display() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        let sink = capture("{depth}:{msg}", Level::Error);
        crate::log_at_depth!(Level::Error, 3, "{}", "deep");
        assert_eq!(sink.drain_logs(), "3:deep");
        set_logger(Logger::new());
    }

    #[test]
    fn dump_macro_writes_file() {
        let _guard = TEST_LOGGER_GUARD.lock().unwrap();
        capture("", Level::Error);
        crate::global_logger::with_logger_mut(|l| l.set_dump_format(""));
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("m_{n}.txt");
        let path = crate::dump!(Level::Error, [1, 2], template.to_str().unwrap(), ";")
            .unwrap()
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "1;2");
        let skipped = crate::dump!(Level::Info, [3], template.to_str().unwrap()).unwrap();
        assert_eq!(skipped, None);
        set_logger(Logger::new());
    }
}
