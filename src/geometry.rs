// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal width, as used by the `{hfill}` tag.
//!
//! [`TerminalColumns`], the default, asks the terminal attached to stderr for its size and
//! falls back to the `COLUMNS` environment variable. Shells usually set `COLUMNS` without
//! exporting it, so on its own ([`EnvColumns`]) it is mostly useful in scripts and CI.

use std::fmt::Debug;

pub trait Geometry: Debug + Send + Sync {
    /// Display columns, or `None` when unknown.
    fn columns(&self) -> Option<usize>;
}

/// Width of the terminal stderr is attached to, else `COLUMNS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TerminalColumns;

impl TerminalColumns {
    /// The window size of stderr, if it is a terminal.
    pub fn of_stderr() -> Option<usize> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            terminal_size::terminal_size_of(std::io::stderr())
                .map(|(terminal_size::Width(w), _)| usize::from(w))
                .filter(|&w| w > 0)
        }
        #[cfg(target_arch = "wasm32")]
        {
            None
        }
    }
}

impl Geometry for TerminalColumns {
    fn columns(&self) -> Option<usize> {
        Self::of_stderr().or_else(|| EnvColumns.columns())
    }
}

/// Reads the `COLUMNS` environment variable on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EnvColumns;

impl Geometry for EnvColumns {
    fn columns(&self) -> Option<usize> {
        std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.trim().parse().ok())
            .filter(|&c| c > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedColumns(pub usize);

impl Geometry for FixedColumns {
    fn columns(&self) -> Option<usize> {
        Some(self.0)
    }
}

/// Width is never known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoColumns;

impl Geometry for NoColumns {
    fn columns(&self) -> Option<usize> {
        None
    }
}
