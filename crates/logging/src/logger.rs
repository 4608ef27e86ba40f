//! crates/logging/src/logger.rs
//! Named logger handles bound to an event sink.

use std::io;
use std::sync::Arc;

use crate::event::{Field, LogEvent};
use crate::severity::Severity;
use crate::sink::EventSink;

/// A named handle for emitting structured events through a sink.
///
/// Handles are cheap to clone and safe to share across threads; the name
/// travels on every emitted event. Whether an event is admitted is decided
/// by the sink at emission time, so a handle created once keeps honoring
/// later threshold changes without being re-acquired.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    sink: Arc<dyn EventSink>,
}

impl Logger {
    /// Creates a handle named `name` writing into `sink`.
    pub fn new(name: impl Into<Arc<str>>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }

    /// The component name attached to emitted events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sink this handle writes into.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    /// Reports whether an event of `severity` would currently be emitted.
    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool {
        self.sink.accepts(severity)
    }

    /// Emits `message` at `severity` with no fields.
    pub fn log(&self, severity: Severity, message: impl Into<String>) -> io::Result<()> {
        self.log_with(severity, message, Vec::new())
    }

    /// Emits `message` at `severity` with structured fields.
    ///
    /// The admission check happens here, against the sink's live state; a
    /// rejected event costs no rendering and no I/O.
    pub fn log_with(
        &self,
        severity: Severity,
        message: impl Into<String>,
        fields: Vec<Field>,
    ) -> io::Result<()> {
        if !self.sink.accepts(severity) {
            return Ok(());
        }

        let mut event = LogEvent::new(severity, Arc::clone(&self.name), message);
        event.fields = fields;
        self.sink.write(&event)
    }

    /// Emits at [`Severity::Trace`].
    pub fn trace(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Trace, message)
    }

    /// Emits at [`Severity::Debug`].
    pub fn debug(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Debug, message)
    }

    /// Emits at [`Severity::Info`].
    pub fn info(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Info, message)
    }

    /// Emits at [`Severity::Warn`].
    pub fn warn(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Warn, message)
    }

    /// Emits at [`Severity::Error`].
    pub fn error(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Error, message)
    }

    /// Emits at [`Severity::Fatal`].
    pub fn fatal(&self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Fatal, message)
    }

    /// Flushes the underlying sink.
    pub fn flush(&self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}
