// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels and their names.
//!
//! Levels are totally ordered from most to least severe. A message is considered for output
//! when its level is *less than or equal to* the logger's threshold:
//!
//! ```rust
//! use scopelog::Level;
//!
//! assert!(Level::Error < Level::Warning);
//! assert!(Level::Critical <= Level::Error);
//! assert_eq!("XDebug".parse::<Level>().unwrap(), Level::XDebug);
//! assert!("xdebug".parse::<Level>().is_err());
//! ```

use crate::error::Error;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// The program cannot continue.
    Critical,
    /// A runtime error.
    Error,
    /// A suspicious condition.
    Warning,
    /// Coarse-grained progress of a long computation.
    Progress,
    /// Something worth remembering.
    Note,
    /// General information.
    Info,
    /// Print-style debugging.
    Debug,
    /// Very detailed debugging.
    XDebug,
}

impl Level {
    /// Every level, most severe first.
    pub const ALL: [Level; 8] = [
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Progress,
        Level::Note,
        Level::Info,
        Level::Debug,
        Level::XDebug,
    ];

    /// The canonical, case-sensitive name.
    pub const fn name(self) -> &'static str {
        match self {
            Level::Critical => "Critical",
            Level::Error => "Error",
            Level::Warning => "Warning",
            Level::Progress => "Progress",
            Level::Note => "Note",
            Level::Info => "Info",
            Level::Debug => "Debug",
            Level::XDebug => "XDebug",
        }
    }

    /// The four-letter abbreviation.
    pub const fn short_name(self) -> &'static str {
        match self {
            Level::Critical => "Crit",
            Level::Error => "Erro",
            Level::Warning => "Warn",
            Level::Progress => "Prog",
            Level::Note => "Note",
            Level::Info => "Info",
            Level::Debug => "Dbug",
            Level::XDebug => "XDbg",
        }
    }

    /// The first letter of the canonical name.
    pub const fn letter(self) -> char {
        match self {
            Level::Critical => 'C',
            Level::Error => 'E',
            Level::Warning => 'W',
            Level::Progress => 'P',
            Level::Note => 'N',
            Level::Info => 'I',
            Level::Debug => 'D',
            Level::XDebug => 'X',
        }
    }

    /**
    Looks a level up by its canonical name.

    Matching is exact: `"XDebug"` is a level, `"Xdebug"` is not.
    */
    pub fn from_name(name: &str) -> Result<Level, Error> {
        Level::ALL
            .into_iter()
            .find(|level| level.name() == name)
            .ok_or_else(|| Error::UnknownLevel(name.to_string()))
    }

    /**
    Whether calls at this level survive compilation.

    Debug builds keep every level. Release builds drop everything more verbose than
    [Level::Progress] unless the `always-on` feature is enabled.
    */
    pub const fn is_built_in(self) -> bool {
        cfg!(any(debug_assertions, feature = "always-on")) || (self as u8) <= (Level::Progress as u8)
    }
}

/// The name-to-level map.
pub fn levels() -> BTreeMap<&'static str, Level> {
    Level::ALL.into_iter().map(|l| (l.name(), l)).collect()
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_name(s)
    }
}

/*
Boilerplate notes.

Copy, Eq, Ord, Hash: levels are plain ordinals.
Default: no. There is no obviously right level, and a default threshold belongs to the logger.
From<&str>: no, lookup is fallible; FromStr covers it.
*/
