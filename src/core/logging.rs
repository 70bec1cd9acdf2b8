//! Process-level logging backend
//!
//! The janitor core talks to a [`DiagnosticsSink`](crate::diagnostics::DiagnosticsSink);
//! the default sink forwards to the `log` facade, and this module installs
//! `flexi_logger` behind that facade for applications that do not bring their own.

use crate::diagnostics::LOG_TARGET;

static LOGGER_HANDLE: std::sync::OnceLock<std::sync::Mutex<flexi_logger::LoggerHandle>> =
    std::sync::OnceLock::new();

/// Output layout selected by the `format` logging setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogLayout {
    Text,
    Extended,
    Json,
}

impl LogLayout {
    fn parse(format: Option<&str>) -> Self {
        match format.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => LogLayout::Json,
            Some("ext") => LogLayout::Extended,
            _ => LogLayout::Text,
        }
    }
}

/// Start `flexi_logger` with the given level spec, layout and optional file
///
/// `log_format` accepts `text` (default), `ext` (adds the source location) and
/// `json`. Colour is only applied to console layouts and is dropped when
/// `NO_COLOR` is set.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let color_enabled = color_enabled && std::env::var_os("NO_COLOR").is_none();
    let mut logger = Logger::try_with_str(log_level.unwrap_or("info"))?;

    logger = match (LogLayout::parse(log_format), color_enabled) {
        (LogLayout::Json, _) => logger.format(json_format),
        (LogLayout::Extended, true) => logger.format(extended_color_format),
        (LogLayout::Extended, false) => logger.format(extended_format),
        (LogLayout::Text, true) => logger.format(text_color_format),
        (LogLayout::Text, false) => logger.format(text_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(std::sync::Mutex::new(handle));

    Ok(())
}

/// Change the active level spec at runtime
///
/// Only the level can be changed once `flexi_logger` is running; layout and
/// file output are fixed at initialisation.
pub fn reconfigure_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(log_level)?;
    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    let abbr = level_abbr(level);
    match level {
        log::Level::Error => abbr.red().bold(),
        log::Level::Warn => abbr.yellow(),
        log::Level::Info => abbr.green(),
        log::Level::Debug => abbr.blue(),
        log::Level::Trace => abbr.magenta(),
    }
}

// "YYYY-MM-DD HH:MM:SS.mmm INF message"
fn text_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn text_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// "YYYY-MM-DD HH:MM:SS.mmm INF message (janitor/dispatcher.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_location(record)
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args(),
        format_location(record).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let json_obj = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_location(record)
    });

    match serde_json::to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

/// Source location for a record, preferring the real file over the target
///
/// Records emitted by the diagnostics sink carry the `janitor` target and no
/// file; those render as the bare target.
fn format_location(record: &log::Record) -> String {
    let path_like = match (record.file(), record.target()) {
        (Some(file), _) => file.strip_prefix("src/").unwrap_or(file).to_string(),
        (None, LOG_TARGET) => LOG_TARGET.to_string(),
        (None, target) => match target.strip_prefix("janitor::") {
            Some(module) => module.replace("::", "/") + ".rs",
            None => target.replace("::", "/"),
        },
    };

    match record.line() {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexi_logger::DeferredNow;

    fn render(
        format: fn(
            &mut dyn std::io::Write,
            &mut DeferredNow,
            &log::Record,
        ) -> Result<(), std::io::Error>,
        record: &log::Record,
    ) -> String {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        format(&mut buffer, &mut now, record).expect("format should succeed");
        String::from_utf8(buffer).expect("Output should be valid UTF-8")
    }

    #[test]
    fn test_layout_parsing_defaults_to_text() {
        assert_eq!(LogLayout::parse(None), LogLayout::Text);
        assert_eq!(LogLayout::parse(Some("JSON")), LogLayout::Json);
        assert_eq!(LogLayout::parse(Some("ext")), LogLayout::Extended);
        assert_eq!(LogLayout::parse(Some("yaml")), LogLayout::Text);
    }

    #[test]
    fn test_text_format_has_level_and_message() {
        let record = log::Record::builder()
            .level(log::Level::Info)
            .target(LOG_TARGET)
            .args(format_args!("🧹 Janitor (2 trackables)"))
            .build();

        let output = render(text_format, &record);
        assert!(
            output.contains("INF 🧹 Janitor (2 trackables)"),
            "unexpected output: {}",
            output
        );
    }

    #[test]
    fn test_extended_format_appends_location() {
        let record = log::Record::builder()
            .level(log::Level::Warn)
            .target("janitor::janitor::dispatcher")
            .args(format_args!("unsupported type"))
            .build();

        let output = render(extended_format, &record);
        assert!(output.contains("WRN unsupported type"));
        assert!(
            output.ends_with("(janitor/dispatcher.rs)"),
            "unexpected output: {}",
            output
        );
    }

    #[test]
    fn test_json_format_is_single_line_object() {
        let record = log::Record::builder()
            .level(log::Level::Error)
            .target(LOG_TARGET)
            .file(Some("src/janitor/dispatcher.rs"))
            .line(Some(7))
            .args(format_args!("disposing 'hud': lost"))
            .build();

        let output = render(json_format, &record);
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        assert_eq!(value["level"], "ERR");
        assert_eq!(value["message"], "disposing 'hud': lost");
        assert_eq!(value["target"], "janitor/dispatcher.rs:7");
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_reconfigure_requires_initialised_logger() {
        if LOGGER_HANDLE.get().is_none() {
            assert!(reconfigure_logging("debug").is_err());
        }
    }
}
