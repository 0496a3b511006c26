// SPDX-License-Identifier: MIT OR Apache-2.0

use scopelog::global_logger::{set_logger, with_logger_mut};
use scopelog::sink::InMemorySink;
use scopelog::style::Style;
use scopelog::{scoped, Level, Logger};
use std::sync::{Arc, Mutex};

static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

/// Installs a global logger writing plain text into memory.
fn capture(template: &str) -> Arc<InMemorySink> {
    let sink = Arc::new(InMemorySink::new());
    let mut logger = Logger::new();
    logger.set_sink(sink.clone());
    logger.set_log_format(template);
    for level in Level::ALL {
        logger.set_level_style(level, Style::none());
    }
    set_logger(logger);
    sink
}

#[scoped]
fn outer() {
    scopelog::error!("outer");
    inner();
}

#[scoped]
fn inner() {
    scopelog::error!("inner");
    innermost();
}

#[scoped]
fn innermost() {
    scopelog::error!("innermost");
}

#[scoped]
fn reports_own_line() -> u32 {
    let line = line!() + 1;
    scopelog::error!("here");
    line
}

#[scoped]
fn sized_result() -> [u8; { 1 + 2 }] {
    scopelog::error!("sized");
    [0; 3]
}

#[test]
fn threshold_warning() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{level}: {msg}\n");
    with_logger_mut(|l| l.set_threshold(Level::Warning));

    scopelog::info!("not shown");
    assert_eq!(sink.drain_logs(), "");
    scopelog::error!("shown");
    assert_eq!(sink.drain_logs(), "Error: shown\n");
    scopelog::warning!("also shown");
    assert_eq!(sink.drain_logs(), "Warning: also shown\n");
}

#[test]
fn scoped_functions_nest() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{depth}{depth_marks} {func}: {msg}\n");
    outer();
    assert_eq!(
        sink.drain_logs(),
        "1> outer: outer\n2>> inner: inner\n3>>> innermost: innermost\n"
    );
}

#[test]
fn depth_limit() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{msg} ");
    with_logger_mut(|l| l.set_max_depth(2));
    outer();
    assert_eq!(sink.drain_logs(), "outer inner ");
}

#[test]
fn strip_calls_discount_outer_frames() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{depth}:{msg} ");
    with_logger_mut(|l| {
        l.set_strip_calls(1);
        l.set_max_depth(1);
    });
    outer();
    assert_eq!(sink.drain_logs(), "0:outer 1:inner ");
}

#[test]
fn function_filter_selects_one_function() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{msg} ");
    with_logger_mut(|l| l.set_location("scope_filtering", "^inner$", ".*"))
        .expect("valid patterns");
    outer();
    assert_eq!(sink.drain_logs(), "inner ");
}

#[test]
fn file_filter_rejects_other_files() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{msg} ");
    with_logger_mut(|l| l.set_file_filter("no_such_file")).unwrap();
    outer();
    assert!(sink.is_empty());
}

#[test]
fn line_filter_matches_line_numbers() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{msg}");
    let line = line!() + 2;
    with_logger_mut(|l| l.set_line_filter(&format!("^{line}$"))).unwrap();
    scopelog::error!("this line");
    scopelog::error!("not this one");
    assert_eq!(sink.drain_logs(), "this line");
}

#[test]
fn invalid_pattern_keeps_previous_filters() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{msg} ");
    with_logger_mut(|l| l.set_func_filter("^outer$")).unwrap();
    let err = with_logger_mut(|l| l.set_location(".*", "(", ".*")).unwrap_err();
    assert!(matches!(err, scopelog::Error::InvalidPattern { .. }));
    outer();
    assert_eq!(sink.drain_logs(), "outer ");
}

#[test]
fn in_scope_guards_expensive_work() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{msg}\n");
    with_logger_mut(|l| l.set_threshold(Level::Debug));
    let mut ran = false;
    let summary = scopelog::in_scope!(Level::Debug, {
        ran = true;
        let total: u64 = (1..=10).sum();
        scopelog::debug!("total {total}");
        total
    });
    assert!(ran);
    assert_eq!(summary, Some(55));
    assert_eq!(sink.drain_logs(), "total 55\n");

    ran = false;
    assert_eq!(
        scopelog::in_scope!(Level::XDebug, {
            ran = true;
        }),
        None
    );
    assert!(!ran);
}

#[test]
fn scoped_functions_keep_call_site_lines() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{func}:{line}");
    let line = reports_own_line();
    assert_eq!(sink.drain_logs(), format!("reports_own_line:{line}"));

    with_logger_mut(|l| l.set_line_filter(&format!("^{line}$"))).unwrap();
    reports_own_line();
    assert_eq!(sink.drain_logs(), format!("reports_own_line:{line}"));
}

#[test]
fn braces_in_signature_are_not_the_body() {
    let _guard = TEST_LOGGER_GUARD.lock().unwrap();
    let sink = capture("{depth} {msg}");
    assert_eq!(sized_result(), [0; 3]);
    assert_eq!(sink.drain_logs(), "1 sized");
}
