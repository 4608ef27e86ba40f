#![deny(unsafe_code)]

//! Shared test utilities for the logtool workspace.
//!
//! The central helper is [`CapturingSink`], an in-memory [`EventSink`] that
//! records every event written through it so tests can assert on exactly
//! what reached the output side of a logging pipeline.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use logging::{EventSink, LogEvent, Severity};

/// An [`EventSink`] that captures written events in memory.
///
/// Wrap it in an [`Arc`] and hand clones to the code under test; the
/// original keeps access to everything that was written, in write order.
#[derive(Debug, Default)]
pub struct CapturingSink {
    events: Mutex<Vec<LogEvent>>,
}

impl CapturingSink {
    /// Creates an empty capturing sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty capturing sink already wrapped in an [`Arc`].
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns a copy of every captured event, in write order.
    #[must_use]
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the captured event messages, in write order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }

    /// Returns the number of captured events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reports whether no events were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards every captured event.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventSink for CapturingSink {
    fn write(&self, event: &LogEvent) -> io::Result<()> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

/// An [`EventSink`] that fails every write with the given error kind.
///
/// Used to verify that I/O failures pass through decorating layers
/// unchanged.
#[derive(Debug)]
pub struct FailingSink {
    kind: io::ErrorKind,
}

impl FailingSink {
    /// Creates a sink whose writes fail with `kind`.
    #[must_use]
    pub const fn new(kind: io::ErrorKind) -> Self {
        Self { kind }
    }
}

impl Default for FailingSink {
    fn default() -> Self {
        Self::new(io::ErrorKind::BrokenPipe)
    }
}

impl EventSink for FailingSink {
    fn accepts(&self, _severity: Severity) -> bool {
        true
    }

    fn write(&self, _event: &LogEvent) -> io::Result<()> {
        Err(io::Error::new(self.kind, "sink write rejected"))
    }

    fn flush(&self) -> io::Result<()> {
        Err(io::Error::new(self.kind, "sink flush rejected"))
    }
}
