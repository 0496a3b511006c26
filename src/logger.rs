// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logger: configuration plus the `log` and `dump` entry points.
//!
//! A [`Logger`] ties the pieces together. For every call it asks the
//! [`ScopeMatcher`] whether the call site is in scope and, if so, renders the message with the
//! [`Renderer`] and hands it to the [`Sink`].
//!
//! Most programs use the process-wide instance through the macros (see
//! [`global_logger`](crate::global_logger)); tests and embedders can build their own.
//!
//! ```rust
//! use scopelog::depth::FixedDepth;
//! use scopelog::sink::InMemorySink;
//! use scopelog::style::Style;
//! use scopelog::{Level, Location, Logger};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let mut logger = Logger::new();
//! logger.set_sink(sink.clone());
//! logger.set_depth_provider(Arc::new(FixedDepth(2)));
//! logger.set_level_style(Level::Warning, Style::none());
//! logger.set_log_format("{level_short}{depth_marks} {msg} ({func})\n");
//! logger.set_threshold(Level::Warning);
//!
//! let here = Location::new("src/app.rs", "main", 10);
//! logger.log(Level::Warning, "low memory", &here).unwrap();
//! logger.log(Level::Info, "ignored", &here).unwrap();
//! assert_eq!(sink.drain_logs(), "Warn>> low memory (main)\n");
//! ```

use crate::depth::{DepthProvider, ScopeDepth};
use crate::error::Result;
use crate::fill::HorizontalFill;
use crate::format::Renderer;
use crate::geometry::{Geometry, TerminalColumns};
use crate::level::Level;
use crate::location::{FilenameMode, Location};
use crate::log_record::LogRecord;
use crate::scope::{ScopeMatcher, ScopeResult};
use crate::sink::{Sink, StderrSink};
use crate::style::Style;
use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Default template for [Logger::log].
pub const DEFAULT_LOG_FORMAT: &str =
    "[{name}] {level_letter}:{depth_marks} {msg} {hfill} {func} @ {file}:{line}\n";
/// Default header template for [Logger::dump].
pub const DEFAULT_DUMP_FORMAT: &str =
    "# [{name}] {level} in {func} (at depth {depth}) @ {file}:{line}";
/// Default file name for dumps; `{n}` is replaced by the first unused number.
pub const DEFAULT_DUMP_FILENAME: &str = "scopelog_dump_{n}.dat";
pub const DEFAULT_DUMP_SEPARATOR: &str = "\n";
/// The counter placeholder in dump file names.
pub const DUMP_COUNTER: &str = "{n}";

#[derive(Debug, Clone)]
pub struct Logger {
    scope: ScopeMatcher,
    renderer: Renderer,
    log_format: String,
    dump_format: String,
    sink: Arc<dyn Sink>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /**
    A logger with default settings.

    Threshold [Level::Error], no depth limit, filters matching anything, scope-frame depth,
    terminal width from stderr's terminal (or `COLUMNS`), output to stderr.
    */
    pub fn new() -> Self {
        Logger {
            scope: ScopeMatcher::new(Arc::new(ScopeDepth)),
            renderer: Renderer::new(Arc::new(TerminalColumns)),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            dump_format: DEFAULT_DUMP_FORMAT.to_string(),
            sink: Arc::new(StderrSink::new()),
        }
    }

    // ------------------------------------------------------------------
    // scope configuration
    // ------------------------------------------------------------------

    pub fn threshold(&self) -> Level {
        self.scope.threshold()
    }

    pub fn set_threshold(&mut self, threshold: Level) {
        self.scope.set_threshold(threshold);
    }

    /// Sets the threshold from a canonical level name such as `"Debug"`.
    pub fn set_threshold_name(&mut self, name: &str) -> Result<()> {
        self.scope.set_threshold(Level::from_name(name)?);
        Ok(())
    }

    pub fn max_depth(&self) -> usize {
        self.scope.max_depth()
    }

    /// Calls deeper than `max_depth` (after strip calls) are dropped.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.scope.set_max_depth(max_depth);
    }

    pub fn strip_calls(&self) -> usize {
        self.scope.strip_calls()
    }

    /// Number of innermost frames that do not count towards depth.
    pub fn set_strip_calls(&mut self, strip_calls: usize) {
        self.scope.set_strip_calls(strip_calls);
    }

    pub fn set_file_filter(&mut self, pattern: &str) -> Result<()> {
        self.scope.filters_mut().set_file(pattern)
    }

    pub fn set_func_filter(&mut self, pattern: &str) -> Result<()> {
        self.scope.filters_mut().set_func(pattern)
    }

    pub fn set_line_filter(&mut self, pattern: &str) -> Result<()> {
        self.scope.filters_mut().set_line(pattern)
    }

    /// Sets all three location filters; nothing changes if any pattern is invalid.
    pub fn set_location(&mut self, file: &str, func: &str, line: &str) -> Result<()> {
        self.scope.filters_mut().set_all(file, func, line)
    }

    pub fn clear_location(&mut self) {
        self.scope.filters_mut().clear();
    }

    pub fn set_depth_provider(&mut self, depth: Arc<dyn DepthProvider>) {
        self.scope.set_depth_provider(depth);
    }

    // ------------------------------------------------------------------
    // output configuration
    // ------------------------------------------------------------------

    pub fn log_format(&self) -> &str {
        &self.log_format
    }

    pub fn set_log_format(&mut self, template: impl Into<String>) {
        self.log_format = template.into();
    }

    pub fn dump_format(&self) -> &str {
        &self.dump_format
    }

    /// Header written at the top of dump files; empty for no header.
    pub fn set_dump_format(&mut self, template: impl Into<String>) {
        self.dump_format = template.into();
    }

    pub fn level_style(&self, level: Level) -> Style {
        self.renderer.level_style(level)
    }

    pub fn set_level_style(&mut self, level: Level, style: impl Into<Style>) {
        self.renderer.set_level_style(level, style);
    }

    pub fn set_filehash_styles(&mut self, styles: Vec<Style>) {
        self.renderer.set_filehash_styles(styles);
    }

    pub fn set_funchash_styles(&mut self, styles: Vec<Style>) {
        self.renderer.set_funchash_styles(styles);
    }

    pub fn set_depth_styles(&mut self, styles: Vec<Style>) {
        self.renderer.set_depth_styles(styles);
    }

    pub fn set_depth_mark(&mut self, mark: impl Into<String>) {
        self.renderer.set_depth_mark(mark);
    }

    pub fn set_filename(&mut self, mode: FilenameMode) {
        self.renderer.set_filename(mode);
    }

    /// Replaces the `{name}` value, which defaults to the executable's file name.
    pub fn set_program_name(&mut self, name: impl Into<String>) {
        self.renderer.set_program_name(name);
    }

    pub fn hfill(&self) -> &HorizontalFill {
        self.renderer.hfill()
    }

    pub fn set_hfill_mark(&mut self, mark: char) {
        self.renderer.hfill_mut().mark = mark;
    }

    pub fn set_hfill_min(&mut self, columns: usize) {
        self.renderer.hfill_mut().min_columns = columns;
    }

    pub fn set_hfill_max(&mut self, columns: usize) {
        self.renderer.hfill_mut().max_columns = columns;
    }

    pub fn set_hfill_style(&mut self, style: impl Into<Style>) {
        self.renderer.hfill_mut().style = style.into();
    }

    pub fn set_geometry(&mut self, geometry: Arc<dyn Geometry>) {
        self.renderer.set_geometry(geometry);
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn set_sink(&mut self, sink: Arc<dyn Sink>) {
        self.sink = sink;
    }

    // ------------------------------------------------------------------
    // operations
    // ------------------------------------------------------------------

    pub fn locate(&self, level: Level, location: &Location<'_>) -> ScopeResult {
        self.scope.locate(level, location)
    }

    /// Depth as shown by `{depth}`: raw depth minus strip calls.
    fn shown_depth(&self, scope: &ScopeResult) -> usize {
        scope.depth.saturating_sub(self.scope.strip_calls())
    }

    /// Renders `template` for a call site without any scope check.
    pub fn format(
        &self,
        template: &str,
        message: &str,
        level: Level,
        location: &Location<'_>,
        depth: usize,
    ) -> String {
        self.renderer.render(template, message, level, location, depth)
    }

    /// Logs `message` if the call site is in scope. Out-of-scope calls do nothing.
    pub fn log(&self, level: Level, message: impl Display, location: &Location<'_>) -> Result<()> {
        self.log_at_depth(level, message, location, 0)
    }

    /**
    Like [Logger::log], but displays the depth increased by `delta`.

    The depth limit is still checked against the real depth.
    */
    pub fn log_at_depth(
        &self,
        level: Level,
        message: impl Display,
        location: &Location<'_>,
        delta: usize,
    ) -> Result<()> {
        let scope = self.locate(level, location);
        if !scope.matches {
            return Ok(());
        }
        let depth = self.shown_depth(&scope).saturating_add(delta);
        let text = self.format(
            &self.log_format,
            &message.to_string(),
            level,
            location,
            depth,
        );
        self.sink.write_record(&LogRecord::new(level, text))?;
        self.sink.flush()?;
        Ok(())
    }

    /// Runs `f` if the call site is in scope.
    pub fn in_scope<R>(
        &self,
        level: Level,
        location: &Location<'_>,
        f: impl FnOnce() -> R,
    ) -> Option<R> {
        self.locate(level, location).matches.then(f)
    }

    /**
    Writes `items` to a file of their own if the call site is in scope.

    The file starts with the rendered dump header (unless the dump format is empty) followed by
    `separator`, then the items joined by `separator`. If `filename` contains `{n}`, it is
    replaced by the smallest number that does not name an existing file; otherwise an existing
    file is overwritten.

    Returns the path written, or `None` when the call was out of scope.
    */
    pub fn dump<I>(
        &self,
        level: Level,
        items: I,
        location: &Location<'_>,
        filename: &str,
        separator: &str,
    ) -> Result<Option<PathBuf>>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let scope = self.locate(level, location);
        if !scope.matches {
            return Ok(None);
        }
        let (path, file) = create_dump_file(filename)?;
        let mut out = BufWriter::new(file);
        if !self.dump_format.is_empty() {
            let header = self.format(
                &self.dump_format,
                "",
                level,
                location,
                self.shown_depth(&scope),
            );
            out.write_all(header.as_bytes())?;
            out.write_all(separator.as_bytes())?;
        }
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                out.write_all(separator.as_bytes())?;
            }
            write!(out, "{item}")?;
        }
        out.flush()?;
        Ok(Some(path))
    }
}

fn create_dump_file(template: &str) -> io::Result<(PathBuf, File)> {
    if !template.contains(DUMP_COUNTER) {
        let path = PathBuf::from(template);
        let file = File::create(&path)?;
        return Ok((path, file));
    }
    let mut n: u64 = 0;
    loop {
        let path = PathBuf::from(template.replace(DUMP_COUNTER, &n.to_string()));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::{FixedDepth, NoDepth};
    use crate::error::Error;
    use crate::geometry::NoColumns;
    use crate::sink::InMemorySink;

    const MAIN: Location<'static> = Location::new("tests/core.rs", "main", 3);

    fn quiet_logger(depth: usize) -> (Logger, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        let mut logger = Logger::new();
        logger.set_sink(sink.clone());
        logger.set_depth_provider(Arc::new(FixedDepth(depth)));
        logger.set_geometry(Arc::new(NoColumns));
        for level in Level::ALL {
            logger.set_level_style(level, Style::none());
        }
        (logger, sink)
    }

    #[test]
    fn threshold_gates_output() {
        let (mut logger, sink) = quiet_logger(0);
        logger.set_log_format("{level}: {msg}\n");
        logger.set_threshold(Level::Warning);
        logger.log(Level::Info, "hidden", &MAIN).unwrap();
        assert!(sink.is_empty());
        logger.log(Level::Error, "shown", &MAIN).unwrap();
        assert_eq!(sink.drain_logs(), "Error: shown\n");
    }

    #[test]
    fn threshold_by_name() {
        let (mut logger, _) = quiet_logger(0);
        logger.set_threshold_name("XDebug").unwrap();
        assert_eq!(logger.threshold(), Level::XDebug);
        assert!(matches!(
            logger.set_threshold_name("Xdebug"),
            Err(Error::UnknownLevel(_))
        ));
        assert_eq!(logger.threshold(), Level::XDebug);
    }

    #[test]
    fn strip_calls_adjusts_displayed_depth() {
        let (mut logger, sink) = quiet_logger(5);
        logger.set_log_format("{depth}{depth_marks}\n");
        logger.set_strip_calls(3);
        logger.log(Level::Error, "", &MAIN).unwrap();
        assert_eq!(sink.drain_logs(), "2>>\n");
    }

    #[test]
    fn depth_limit_counts_strip_calls() {
        let (mut logger, sink) = quiet_logger(5);
        logger.set_log_format("{msg}");
        logger.set_max_depth(2);
        logger.set_strip_calls(3);
        logger.log(Level::Error, "at limit", &MAIN).unwrap();
        logger.set_strip_calls(2);
        logger.log(Level::Error, "too deep", &MAIN).unwrap();
        assert_eq!(sink.drain_logs(), "at limit");
    }

    #[test]
    fn depth_delta_only_affects_display() {
        let (mut logger, sink) = quiet_logger(1);
        logger.set_log_format("{depth} {msg}\n");
        logger.set_max_depth(1);
        logger.log_at_depth(Level::Error, "shifted", &MAIN, 2).unwrap();
        assert_eq!(sink.drain_logs(), "3 shifted\n");
    }

    #[test]
    fn unknown_depth_shows_zero() {
        let (mut logger, sink) = quiet_logger(0);
        logger.set_depth_provider(Arc::new(NoDepth));
        logger.set_max_depth(0);
        logger.set_strip_calls(4);
        logger.set_log_format("[{depth}|{depth_marks}]");
        logger.log(Level::Error, "", &MAIN).unwrap();
        assert_eq!(sink.drain_logs(), "[0|]");
    }

    #[test]
    fn location_filters_gate_output() {
        let (mut logger, sink) = quiet_logger(0);
        logger.set_log_format("{func} ");
        logger.set_threshold(Level::XDebug);
        logger.set_location("core", "g", ".*").unwrap();
        for func in ["f", "g", "h"] {
            logger
                .log(Level::Info, "", &Location::new("tests/core.rs", func, 1))
                .unwrap();
        }
        logger
            .log(Level::Info, "", &Location::new("tests/other.rs", "g", 1))
            .unwrap();
        assert_eq!(sink.drain_logs(), "g ");
    }

    #[test]
    fn bad_pattern_is_reported() {
        let (mut logger, _) = quiet_logger(0);
        assert!(matches!(
            logger.set_line_filter("[0-9"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn in_scope_runs_only_when_matching() {
        let (mut logger, _) = quiet_logger(0);
        logger.set_func_filter("^main$").unwrap();
        assert_eq!(logger.in_scope(Level::Error, &MAIN, || 42), Some(42));
        let other = Location::new("tests/core.rs", "helper", 9);
        assert_eq!(logger.in_scope(Level::Error, &other, || 42), None);
        assert_eq!(logger.in_scope(Level::Debug, &MAIN, || 42), None);
    }

    #[test]
    fn dump_writes_header_and_items() {
        let dir = tempfile::tempdir().unwrap();
        let (mut logger, sink) = quiet_logger(0);
        logger.set_program_name("prog");
        let template = dir.path().join("dump.txt");
        let path = logger
            .dump(
                Level::Error,
                ["hello", "world", "!"],
                &MAIN,
                template.to_str().unwrap(),
                "\n",
            )
            .unwrap()
            .unwrap();
        assert_eq!(path, template);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "# [prog] Error in main (at depth 0) @ tests/core.rs:3\nhello\nworld\n!"
        );
        assert!(sink.is_empty(), "dumps bypass the sink");
    }

    #[test]
    fn dump_counter_picks_first_free_name() {
        let dir = tempfile::tempdir().unwrap();
        let (mut logger, _) = quiet_logger(0);
        logger.set_dump_format("");
        std::fs::write(dir.path().join("d_0.csv"), "taken").unwrap();
        let template = dir.path().join("d_{n}.csv");
        let template = template.to_str().unwrap();

        let first = logger.dump(Level::Error, [1, 2, 3], &MAIN, template, ",").unwrap();
        let second = logger.dump(Level::Error, [4], &MAIN, template, ",").unwrap();
        assert_eq!(first, Some(dir.path().join("d_1.csv")));
        assert_eq!(second, Some(dir.path().join("d_2.csv")));
        assert_eq!(std::fs::read_to_string(dir.path().join("d_1.csv")).unwrap(), "1,2,3");
        assert_eq!(std::fs::read_to_string(dir.path().join("d_0.csv")).unwrap(), "taken");
    }

    #[test]
    fn dump_out_of_scope_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, _) = quiet_logger(0);
        let template = dir.path().join("never_{n}.txt");
        let written = logger
            .dump(Level::Debug, ["x"], &MAIN, template.to_str().unwrap(), "\n")
            .unwrap();
        assert_eq!(written, None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
