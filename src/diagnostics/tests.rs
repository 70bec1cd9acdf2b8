//! Tests for verbosity gating, sinks and depth tracking

use super::*;
use serial_test::serial;
use strum::IntoEnumIterator;

fn recording() -> (Rc<MemorySink>, Diagnostics) {
    let sink = Rc::new(MemorySink::new());
    let diagnostics = Diagnostics::new(sink.clone());
    (sink, diagnostics)
}

#[test]
fn test_verbosity_parses_case_insensitively() {
    assert_eq!("VERBOSE".parse::<Verbosity>().unwrap(), Verbosity::Verbose);
    assert_eq!("none".parse::<Verbosity>().unwrap(), Verbosity::None);
    assert!("chatty".parse::<Verbosity>().is_err());
    assert_eq!(Verbosity::Debug.to_string(), "debug");
}

#[test]
fn test_verbosity_is_ordered() {
    let levels: Vec<Verbosity> = Verbosity::iter().collect();
    let mut sorted = levels.clone();
    sorted.sort();
    assert_eq!(levels, sorted);
    assert_eq!(levels.first(), Some(&Verbosity::None));
}

#[test]
#[serial]
fn test_gating_follows_global_verbosity() {
    let (sink, diagnostics) = recording();

    set_verbosity(Verbosity::Info);
    diagnostics.info(format_args!("banner"));
    diagnostics.verbose(format_args!("node"));
    diagnostics.debug(format_args!("geometry"));

    set_verbosity(Verbosity::Debug);
    diagnostics.debug(format_args!("geometry again"));
    set_verbosity(Verbosity::Info);

    let messages: Vec<String> = sink.records().into_iter().map(|(_, m)| m).collect();
    assert_eq!(messages, vec!["banner", "geometry again"]);
}

#[test]
#[serial]
fn test_errors_and_warnings_ignore_verbosity() {
    let (sink, diagnostics) = recording();

    set_verbosity(Verbosity::None);
    diagnostics.info(format_args!("hidden"));
    diagnostics.warn(format_args!("unsupported type"));
    diagnostics.error(format_args!("teardown failed"));
    set_verbosity(Verbosity::Info);

    assert_eq!(sink.messages_at(MessageLevel::Warn), vec!["unsupported type"]);
    assert!(sink.has_errors());
    assert!(sink.messages_at(MessageLevel::Info).is_empty());
}

#[test]
#[serial]
fn test_tagged_sub_logger_reports_at_debug() {
    let (sink, diagnostics) = recording();
    let scene_log = diagnostics.tagged(MessageLevel::Debug);

    set_verbosity(Verbosity::Verbose);
    scene_log.info(format_args!("geometry box"));
    scene_log.error(format_args!("material failed"));

    set_verbosity(Verbosity::Debug);
    scene_log.info(format_args!("geometry plane"));
    set_verbosity(Verbosity::Info);

    assert_eq!(sink.messages_at(MessageLevel::Debug), vec!["geometry plane"]);
    assert_eq!(sink.messages_at(MessageLevel::Error), vec!["material failed"]);
}

#[test]
fn test_depth_guard_restores_on_drop() {
    let before = current_depth();
    {
        let _outer = DepthGuard::enter();
        let _inner = DepthGuard::enter();
        assert_eq!(current_depth(), before + 2);
        assert_eq!(indent("-"), format!("{} ", "-".repeat(before + 2)));
    }
    assert_eq!(current_depth(), before);
}

#[test]
fn test_depth_guard_restores_on_unwind() {
    let before = current_depth();
    let result = std::panic::catch_unwind(|| {
        let _guard = DepthGuard::enter();
        panic!("teardown blew up");
    });
    assert!(result.is_err());
    assert_eq!(current_depth(), before);
}

#[test]
#[serial]
fn test_lines_are_indented_by_depth() {
    let (sink, diagnostics) = recording();
    let diagnostics = diagnostics.with_marker(">");

    diagnostics.info(format_args!("top"));
    {
        let _guard = DepthGuard::enter();
        diagnostics.info(format_args!("child"));
    }

    let messages: Vec<String> = sink.records().into_iter().map(|(_, m)| m).collect();
    assert_eq!(messages, vec!["top", "> child"]);
}
