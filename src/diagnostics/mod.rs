//! Diagnostics shim
//!
//! Level-gated reporting consumed by the disposal engine. Messages are checked
//! against the global [`Verbosity`] before they are rendered, indented by the
//! current nesting depth, and handed to a [`DiagnosticsSink`].

pub mod depth;
pub mod level;
pub mod sink;

pub use depth::{current_depth, indent, DepthGuard};
pub use level::{set_verbosity, verbosity, MessageLevel, Verbosity};
pub use sink::{DiagnosticsSink, LogSink, MemorySink};

use std::fmt;
use std::rc::Rc;

/// `log` target used for everything the janitor core reports
pub const LOG_TARGET: &str = "janitor";

/// Marker repeated once per nesting level in front of each line
pub const DEFAULT_INDENT_MARKER: &str = "-";

/// Cloneable reporting handle shared by a janitor and its dispatcher
#[derive(Clone)]
pub struct Diagnostics {
    sink: Rc<dyn DiagnosticsSink>,
    marker: Rc<str>,
    retag: Option<MessageLevel>,
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("marker", &self.marker)
            .field("retag", &self.retag)
            .finish_non_exhaustive()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Rc::new(LogSink))
    }
}

impl Diagnostics {
    pub fn new(sink: Rc<dyn DiagnosticsSink>) -> Self {
        Self {
            sink,
            marker: Rc::from(DEFAULT_INDENT_MARKER),
            retag: None,
        }
    }

    pub fn with_marker(mut self, marker: &str) -> Self {
        self.marker = Rc::from(marker);
        self
    }

    /// Sub-logger that reports informational messages at debug level
    ///
    /// Errors and warnings keep their level so failures inside a delegated
    /// disposer stay visible at any verbosity.
    pub fn tagged(&self, level: MessageLevel) -> Self {
        Self {
            sink: Rc::clone(&self.sink),
            marker: Rc::clone(&self.marker),
            retag: Some(level),
        }
    }

    pub fn emit(&self, level: MessageLevel, args: fmt::Arguments<'_>) {
        let level = match (self.retag, level) {
            (Some(tag), MessageLevel::Info | MessageLevel::Verbose | MessageLevel::Debug) => tag,
            _ => level,
        };
        if !level.enabled() {
            return;
        }
        let line = format!("{}{}", indent(&self.marker), args);
        self.sink.write(level, &line);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(MessageLevel::Error, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(MessageLevel::Warn, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(MessageLevel::Info, args);
    }

    pub fn verbose(&self, args: fmt::Arguments<'_>) {
        self.emit(MessageLevel::Verbose, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(MessageLevel::Debug, args);
    }
}

#[cfg(test)]
mod tests;
