//! crates/levels/src/bridge.rs
//! Bridge between the tracing ecosystem and the level registry.
//!
//! The layer gives `tracing`-instrumented code the same per-component
//! runtime verbosity control as native [`logging::Logger`] handles: each
//! event target becomes a registry entry on first sight, and events whose
//! severity falls below that entry's threshold are filtered before any
//! other layer sees them.

use tracing::subscriber::Interest;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use logging::Severity;

use crate::manager::LevelManager;

/// A [`Layer`] that filters tracing events through registry thresholds.
///
/// Targets are registered lazily via [`LevelManager::level`], so the
/// registry's serialized state reflects every tracing target observed at
/// runtime and `set_level` patterns apply to them like any other entry.
pub struct RegistryLayer<M> {
    manager: M,
}

impl<M: LevelManager> RegistryLayer<M> {
    /// Creates a filtering layer over `manager`.
    pub const fn new(manager: M) -> Self {
        Self { manager }
    }
}

const fn severity_of(level: &Level) -> Severity {
    match *level {
        Level::TRACE => Severity::Trace,
        Level::DEBUG => Severity::Debug,
        Level::INFO => Severity::Info,
        Level::WARN => Severity::Warn,
        Level::ERROR => Severity::Error,
    }
}

impl<S, M> Layer<S> for RegistryLayer<M>
where
    S: Subscriber,
    M: LevelManager + 'static,
{
    /// Always `sometimes` so the per-event check below keeps running after
    /// a threshold changes; a cached `always`/`never` verdict would pin the
    /// callsite to whatever the threshold was first time around.
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.manager
            .level(metadata.target())
            .enabled(severity_of(metadata.level()))
    }
}
