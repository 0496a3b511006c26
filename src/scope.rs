// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deciding whether a call site is in scope.
//!
//! A call is in scope when three independent predicates hold, checked from cheapest to most
//! expensive:
//!
//! 1. its level is at most as verbose as the threshold,
//! 2. its depth is at most `max_depth + strip_calls` (skipped when depth is unknown),
//! 3. its file, function and line all *contain* a match of the corresponding filter pattern.
//!
//! The first failing predicate ends the evaluation.
//!
//! ```rust
//! use scopelog::depth::FixedDepth;
//! use scopelog::scope::ScopeMatcher;
//! use scopelog::{Level, Location};
//! use std::sync::Arc;
//!
//! let mut matcher = ScopeMatcher::new(Arc::new(FixedDepth(3)));
//! matcher.set_threshold(Level::Warning);
//! matcher.filters_mut().set_file("core").unwrap();
//!
//! let here = Location::new("src/core/engine.rs", "run", 12);
//! assert!(matcher.locate(Level::Error, &here).matches);
//! assert!(!matcher.locate(Level::Info, &here).matches);
//!
//! let elsewhere = Location::new("src/ui.rs", "run", 12);
//! assert!(!matcher.locate(Level::Error, &elsewhere).matches);
//! ```

use crate::depth::DepthProvider;
use crate::error::{Error, Filter, Result};
use crate::level::Level;
use crate::location::Location;
use regex::Regex;
use std::sync::Arc;

/// Outcome of [ScopeMatcher::locate].
///
/// When `matches` is false, `depth` and `there` only reflect the predicates that were actually
/// evaluated; later ones are left at zero / false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeResult {
    pub stage: Level,
    /// Raw depth as reported by the provider; 0 when unknown.
    pub depth: usize,
    /// Whether the location filters matched.
    pub there: bool,
    pub matches: bool,
}

impl ScopeResult {
    const fn rejected(stage: Level, depth: usize) -> Self {
        ScopeResult {
            stage,
            depth,
            there: false,
            matches: false,
        }
    }
}

/// Three independent patterns over file, function and line. Unset patterns match anything.
#[derive(Debug, Clone, Default)]
pub struct LocationFilter {
    file: Option<Regex>,
    func: Option<Regex>,
    line: Option<Regex>,
}

fn compile(filter: Filter, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern { filter, source })
}

fn searches(pattern: &Option<Regex>, haystack: &str) -> bool {
    pattern.as_ref().is_none_or(|re| re.is_match(haystack))
}

impl LocationFilter {
    pub fn set_file(&mut self, pattern: &str) -> Result<()> {
        self.file = Some(compile(Filter::File, pattern)?);
        Ok(())
    }

    pub fn set_func(&mut self, pattern: &str) -> Result<()> {
        self.func = Some(compile(Filter::Function, pattern)?);
        Ok(())
    }

    pub fn set_line(&mut self, pattern: &str) -> Result<()> {
        self.line = Some(compile(Filter::Line, pattern)?);
        Ok(())
    }

    /**
    Replaces all three patterns.

    Nothing is changed unless all three compile.
    */
    pub fn set_all(&mut self, file: &str, func: &str, line: &str) -> Result<()> {
        let file = compile(Filter::File, file)?;
        let func = compile(Filter::Function, func)?;
        let line = compile(Filter::Line, line)?;
        *self = LocationFilter {
            file: Some(file),
            func: Some(func),
            line: Some(line),
        };
        Ok(())
    }

    /// Back to matching anything.
    pub fn clear(&mut self) {
        *self = LocationFilter::default();
    }

    pub fn matches(&self, location: &Location<'_>) -> bool {
        searches(&self.file, location.file)
            && searches(&self.func, location.func)
            && (self.line.is_none() || searches(&self.line, &location.line.to_string()))
    }
}

/// Threshold, depth limit and location filters, plus the depth capability they are checked with.
#[derive(Debug, Clone)]
pub struct ScopeMatcher {
    threshold: Level,
    max_depth: usize,
    strip_calls: usize,
    filters: LocationFilter,
    depth: Arc<dyn DepthProvider>,
}

impl ScopeMatcher {
    /// Threshold [Level::Error], unlimited depth, no strip calls, filters matching anything.
    pub fn new(depth: Arc<dyn DepthProvider>) -> Self {
        ScopeMatcher {
            threshold: Level::Error,
            max_depth: usize::MAX,
            strip_calls: 0,
            filters: LocationFilter::default(),
            depth,
        }
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Level) {
        self.threshold = threshold;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    pub fn strip_calls(&self) -> usize {
        self.strip_calls
    }

    pub fn set_strip_calls(&mut self, strip_calls: usize) {
        self.strip_calls = strip_calls;
    }

    pub fn filters(&self) -> &LocationFilter {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut LocationFilter {
        &mut self.filters
    }

    pub fn set_depth_provider(&mut self, depth: Arc<dyn DepthProvider>) {
        self.depth = depth;
    }

    /// Evaluates the three predicates for a call at `stage` from `location`.
    pub fn locate(&self, stage: Level, location: &Location<'_>) -> ScopeResult {
        if stage > self.threshold {
            return ScopeResult::rejected(stage, 0);
        }

        let depth = match self.depth.depth() {
            Some(depth) => {
                if depth > self.max_depth.saturating_add(self.strip_calls) {
                    return ScopeResult::rejected(stage, depth);
                }
                depth
            }
            None => 0,
        };

        if !self.filters.matches(location) {
            return ScopeResult::rejected(stage, depth);
        }

        ScopeResult {
            stage,
            depth,
            there: true,
            matches: true,
        }
    }
}
