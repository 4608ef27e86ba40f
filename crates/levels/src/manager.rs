//! crates/levels/src/manager.rs
//! The shared contract implemented by the registry and its facades.

use std::sync::Arc;

use logging::{AtomicSeverity, Logger};

use crate::spec::LevelSpec;

/// Error type propagated out of [`LevelManager::for_each`] callbacks.
///
/// Iteration is a passthrough: whatever the callback returns comes back to
/// the caller unchanged, so the type is deliberately the widest practical
/// boxed error.
pub type IterError = Box<dyn std::error::Error + Send + Sync>;

/// The level-registry contract.
///
/// Implemented by [`LevelRegistry`](crate::LevelRegistry) and by
/// [`SubLevels`](crate::SubLevels), which lets namespaces wrap either a
/// registry or another namespace without special cases. Blanket
/// implementations for references and [`Arc`]s mean callers can hand out
/// non-owning views freely.
pub trait LevelManager: Send + Sync {
    /// Returns the threshold cell for `name`, creating it on first use.
    ///
    /// Creation never fails. A new cell defaults to
    /// [`Info`](logging::Severity::Info), or to
    /// [`Debug`](logging::Severity::Debug) when the manager's ambient
    /// severity admits debug output at call time.
    fn level(&self, name: &str) -> Arc<AtomicSeverity>;

    /// Returns a logger handle for `name`, gated by its threshold cell.
    ///
    /// Each entry in `specs` is applied to the freshly ensured entry the
    /// way [`set_level`](Self::set_level) would apply it: literals set the
    /// value outright, threshold references copy their current value.
    fn named(&self, name: &str, specs: &[LevelSpec]) -> Logger;

    /// Applies `spec` to every stored entry matching `pattern`.
    ///
    /// Returns `true` iff the spec resolved and at least one entry
    /// matched. An unresolvable spec returns `false` before any entry is
    /// examined, so a bad value never partially applies.
    fn set_level(&self, pattern: &str, spec: LevelSpec) -> bool;

    /// Exact-name membership test.
    fn contains(&self, name: &str) -> bool;

    /// Removes the exact-name entry if present.
    ///
    /// Handles issued for the name earlier keep logging through their own
    /// reference; removal only affects lookup, enumeration, and bulk
    /// matching.
    fn remove(&self, name: &str);

    /// Visits every stored entry in unspecified order.
    ///
    /// Stops at the first callback error and propagates it without
    /// visiting the remaining entries.
    fn for_each(
        &self,
        visit: &mut dyn FnMut(&str, &Arc<AtomicSeverity>) -> Result<(), IterError>,
    ) -> Result<(), IterError>;

    /// Serializes the full threshold state.
    ///
    /// Output is `name:severity` pairs sorted lexicographically by name
    /// and joined with `,`; a threshold holding the sentinel renders as
    /// `name:invalid`.
    fn render(&self) -> String;
}

impl<M: LevelManager + ?Sized> LevelManager for &M {
    fn level(&self, name: &str) -> Arc<AtomicSeverity> {
        (**self).level(name)
    }

    fn named(&self, name: &str, specs: &[LevelSpec]) -> Logger {
        (**self).named(name, specs)
    }

    fn set_level(&self, pattern: &str, spec: LevelSpec) -> bool {
        (**self).set_level(pattern, spec)
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    fn remove(&self, name: &str) {
        (**self).remove(name);
    }

    fn for_each(
        &self,
        visit: &mut dyn FnMut(&str, &Arc<AtomicSeverity>) -> Result<(), IterError>,
    ) -> Result<(), IterError> {
        (**self).for_each(visit)
    }

    fn render(&self) -> String {
        (**self).render()
    }
}

impl<M: LevelManager + ?Sized> LevelManager for Arc<M> {
    fn level(&self, name: &str) -> Arc<AtomicSeverity> {
        (**self).level(name)
    }

    fn named(&self, name: &str, specs: &[LevelSpec]) -> Logger {
        (**self).named(name, specs)
    }

    fn set_level(&self, pattern: &str, spec: LevelSpec) -> bool {
        (**self).set_level(pattern, spec)
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }

    fn remove(&self, name: &str) {
        (**self).remove(name);
    }

    fn for_each(
        &self,
        visit: &mut dyn FnMut(&str, &Arc<AtomicSeverity>) -> Result<(), IterError>,
    ) -> Result<(), IterError> {
        (**self).for_each(visit)
    }

    fn render(&self) -> String {
        (**self).render()
    }
}
