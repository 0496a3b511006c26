// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unit handed to a [`Sink`](crate::sink::Sink).
//!
//! By the time a record exists, filtering and rendering are done: it is the final text of one
//! message plus the level it was logged at, which sinks may use to pick an output channel.
//!
//! ```rust
//! use scopelog::{Level, LogRecord};
//!
//! let record = LogRecord::new(Level::Warning, "W: disk almost full\n");
//! assert_eq!(record.level(), Level::Warning);
//! assert_eq!(record.to_string(), "W: disk almost full\n");
//! ```

use crate::Level;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    level: Level,
    text: String,
}

impl LogRecord {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        LogRecord {
            level,
            text: text.into(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The rendered message, escape codes and line breaks included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug, Clone, PartialEq/Eq, Hash: derived, plain data
- Display: the rendered text, unchanged

NOT IMPLEMENTED:
- Default: a record without a level makes no sense
- Copy: owns a String
- Ord: no meaningful ordering between records
*/
