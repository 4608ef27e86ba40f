//! crates/levels/src/gate.rs
//! The per-name filtering decorator inserted in front of a sink.

use std::io;
use std::sync::Arc;

use logging::{AtomicSeverity, EventSink, LogEvent, Severity};

/// An [`EventSink`] decorator gating one threshold over one inner sink.
///
/// The admission check reads the threshold cell at emission time, which is
/// what makes a later bulk update take effect on handles issued long
/// before it. Writes and flushes forward unconditionally: admission and
/// output stay two separable steps so aggregation layers below can batch
/// the output of many gates.
#[derive(Clone)]
pub struct LevelGate {
    threshold: Arc<AtomicSeverity>,
    inner: Arc<dyn EventSink>,
}

impl LevelGate {
    /// Binds `threshold` in front of `inner`.
    #[must_use]
    pub fn new(threshold: Arc<AtomicSeverity>, inner: Arc<dyn EventSink>) -> Self {
        Self { threshold, inner }
    }

    /// The threshold cell this gate consults.
    #[must_use]
    pub fn threshold(&self) -> &Arc<AtomicSeverity> {
        &self.threshold
    }

    /// The decorated sink.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn EventSink> {
        &self.inner
    }
}

impl EventSink for LevelGate {
    fn accepts(&self, severity: Severity) -> bool {
        self.threshold.enabled(severity)
    }

    fn write(&self, event: &LogEvent) -> io::Result<()> {
        self.inner.write(event)
    }

    fn flush(&self) -> io::Result<()> {
        self.inner.flush()
    }

    fn close(&self) -> io::Result<()> {
        self.inner.close()
    }
}
