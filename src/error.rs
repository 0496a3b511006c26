// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors reported by configuration and by `dump`.
//!
//! Filtering is never an error: a rejected call simply produces no output. The only
//! conditions surfaced to callers are bad configuration values and I/O failures.

use std::fmt::Display;

/// Which location filter a pattern was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    File,
    Function,
    Line,
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::File => f.write_str("file"),
            Filter::Function => f.write_str("function"),
            Filter::Line => f.write_str("line"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown level name `{0}`")]
    UnknownLevel(String),
    #[error("invalid {filter} filter pattern")]
    InvalidPattern {
        filter: Filter,
        #[source]
        source: regex::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
