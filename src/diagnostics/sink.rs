//! Diagnostics sinks

use super::level::MessageLevel;
use super::LOG_TARGET;
use std::cell::RefCell;

/// Receives already-gated, already-formatted diagnostic lines
pub trait DiagnosticsSink {
    fn write(&self, level: MessageLevel, message: &str);
}

/// Forwards diagnostics to the `log` facade under the `janitor` target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn write(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Error => log::error!(target: LOG_TARGET, "{}", message),
            MessageLevel::Warn => log::warn!(target: LOG_TARGET, "{}", message),
            MessageLevel::Info => log::info!(target: LOG_TARGET, "{}", message),
            MessageLevel::Verbose => log::debug!(target: LOG_TARGET, "{}", message),
            MessageLevel::Debug => log::trace!(target: LOG_TARGET, "{}", message),
        }
    }
}

/// Keeps every line it receives
///
/// Disposal never reports failure through its return value, so callers that
/// need to know whether a pass was clean inspect a `MemorySink` afterwards.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<(MessageLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded `(level, message)` pairs in arrival order
    pub fn records(&self) -> Vec<(MessageLevel, String)> {
        self.records.borrow().clone()
    }

    /// Messages recorded at `level`, in arrival order
    pub fn messages_at(&self, level: MessageLevel) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|(recorded, _)| *recorded == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|(level, _)| *level == MessageLevel::Error)
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl DiagnosticsSink for MemorySink {
    fn write(&self, level: MessageLevel, message: &str) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}
