//! crates/levels/src/registry.rs
//! The dynamic named level registry.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use logging::{AtomicSeverity, EventSink, Field, Logger, Severity};

use crate::gate::LevelGate;
use crate::manager::{IterError, LevelManager};
use crate::pattern::matches_pattern;
use crate::spec::LevelSpec;

/// Name of the registry's own diagnostic logger.
///
/// Every registry owns this entry from birth, so its internal set-level
/// tracing is itself subject to runtime verbosity control.
pub const INTERNAL_LOGGER: &str = "Internal.LogLevels";

/// The name-to-threshold registry.
///
/// One readers/writer lock guards the map itself: membership, insertion,
/// removal, and enumeration. Individual threshold cells are atomic and
/// never require the lock once a caller holds a reference, which is what
/// lets issued logger handles outlive any critical section and gate events
/// from arbitrary threads.
pub struct LevelRegistry {
    entries: RwLock<FxHashMap<String, Arc<AtomicSeverity>>>,
    sink: Arc<dyn EventSink>,
    ambient: Arc<AtomicSeverity>,
    diag: Logger,
}

impl LevelRegistry {
    /// Creates a registry emitting into `sink` with the given ambient base
    /// severity.
    ///
    /// The ambient severity is what the debug-bootstrap rule consults: a
    /// process started with `base` at [`Severity::Debug`] gets every
    /// lazily created entry at Debug instead of Info, so fine-grained
    /// tracing can be switched on globally at startup without touching
    /// each component.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>, base: Severity) -> Self {
        let ambient = Arc::new(AtomicSeverity::new(base));
        let internal = Arc::new(AtomicSeverity::new(if ambient.enabled(Severity::Debug) {
            Severity::Debug
        } else {
            Severity::Info
        }));

        let mut entries = FxHashMap::default();
        entries.insert(INTERNAL_LOGGER.to_owned(), Arc::clone(&internal));

        let diag = Logger::new(
            INTERNAL_LOGGER,
            Arc::new(LevelGate::new(internal, Arc::clone(&sink))),
        );

        Self {
            entries: RwLock::new(entries),
            sink,
            ambient,
            diag,
        }
    }

    /// The ambient base severity cell.
    #[must_use]
    pub fn ambient(&self) -> &Arc<AtomicSeverity> {
        &self.ambient
    }

    /// The sink issued handles write into.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    fn default_severity(&self) -> Severity {
        if self.ambient.enabled(Severity::Debug) {
            Severity::Debug
        } else {
            Severity::Info
        }
    }
}

impl LevelManager for LevelRegistry {
    fn level(&self, name: &str) -> Arc<AtomicSeverity> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(cell) = entries.get(name) {
            return Arc::clone(cell);
        }

        let cell = Arc::new(AtomicSeverity::new(self.default_severity()));
        entries.insert(name.to_owned(), Arc::clone(&cell));
        cell
    }

    fn named(&self, name: &str, specs: &[LevelSpec]) -> Logger {
        let cell = self.level(name);

        for spec in specs {
            self.set_level(name, spec.clone());
        }

        Logger::new(name, Arc::new(LevelGate::new(cell, Arc::clone(&self.sink))))
    }

    fn set_level(&self, pattern: &str, spec: LevelSpec) -> bool {
        let _ = self.diag.log_with(
            Severity::Debug,
            "set_level",
            vec![Field::new("pattern", pattern)],
        );

        // Resolve once, before the critical section; a bad value must not
        // partially apply, and a threshold reference must snapshot here.
        let Ok(target) = spec.resolve() else {
            return false;
        };

        let entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut found = false;
        for (name, cell) in entries.iter() {
            if matches_pattern(name, pattern) {
                let _ = self.diag.log_with(
                    Severity::Debug,
                    "setting level",
                    vec![
                        Field::new("pattern", pattern),
                        Field::new("match", name.as_str()),
                        Field::new("level", target.as_str()),
                    ],
                );
                cell.set(target);
                found = true;
            }
        }

        found
    }

    fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    fn remove(&self, name: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    fn for_each(
        &self,
        visit: &mut dyn FnMut(&str, &Arc<AtomicSeverity>) -> Result<(), IterError>,
    ) -> Result<(), IterError> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        for (name, cell) in entries.iter() {
            visit(name, cell)?;
        }

        Ok(())
    }

    fn render(&self) -> String {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut pairs: Vec<String> = entries
            .iter()
            .map(|(name, cell)| format!("{name}:{cell}"))
            .collect();
        drop(entries);

        pairs.sort_unstable();
        pairs.join(",")
    }
}

impl fmt::Display for LevelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for LevelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelRegistry")
            .field("levels", &self.render())
            .finish()
    }
}
