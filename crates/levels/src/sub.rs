//! crates/levels/src/sub.rs
//! Prefix-scoped facade over a parent level manager.

use std::fmt;
use std::sync::Arc;

use logging::{AtomicSeverity, Logger};

use crate::manager::{IterError, LevelManager};
use crate::spec::LevelSpec;

/// A sub-registry that scopes every name under `"<prefix>."`.
///
/// `SubLevels` owns no entries; it rewrites names and delegates to its
/// parent, which may be a [`LevelRegistry`](crate::LevelRegistry) or
/// another `SubLevels` (prefixes compose left-to-right). It is a naming
/// convenience, not an isolation boundary: [`for_each`](Self::for_each)
/// and [`render`](Self::render) deliberately expose the *entire*
/// underlying registry, and entries created through a facade survive the
/// facade itself - removal is by name, never by creator.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use levels::{LevelManager, LevelRegistry, LevelSpec, SubLevels};
/// use logging::{Severity, WriterSink};
///
/// let registry = LevelRegistry::new(Arc::new(WriterSink::new(Vec::new())), Severity::Info);
/// let child = SubLevels::new("Child", &registry);
///
/// child.named("Core", &[]);
/// assert!(registry.contains("Child.Core"));
///
/// // Setting through the facade is setting on the registry.
/// assert!(child.set_level("Core", LevelSpec::from(Severity::Debug)));
/// assert_eq!(registry.level("Child.Core").get(), Severity::Debug);
/// ```
pub struct SubLevels<M> {
    prefix: String,
    parent: M,
}

impl<M: LevelManager> SubLevels<M> {
    /// Creates a facade prepending `"<prefix>."` to every name.
    pub fn new(prefix: impl Into<String>, parent: M) -> Self {
        Self {
            prefix: prefix.into(),
            parent,
        }
    }

    /// The scope prefix, without the trailing separator.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn scoped(&self, name: &str) -> String {
        format!("{}.{name}", self.prefix)
    }
}

impl<M: LevelManager> LevelManager for SubLevels<M> {
    fn level(&self, name: &str) -> Arc<AtomicSeverity> {
        self.parent.level(&self.scoped(name))
    }

    fn named(&self, name: &str, specs: &[LevelSpec]) -> Logger {
        self.parent.named(&self.scoped(name), specs)
    }

    fn set_level(&self, pattern: &str, spec: LevelSpec) -> bool {
        self.parent.set_level(&self.scoped(pattern), spec)
    }

    fn contains(&self, name: &str) -> bool {
        self.parent.contains(&self.scoped(name))
    }

    fn remove(&self, name: &str) {
        self.parent.remove(&self.scoped(name));
    }

    fn for_each(
        &self,
        visit: &mut dyn FnMut(&str, &Arc<AtomicSeverity>) -> Result<(), IterError>,
    ) -> Result<(), IterError> {
        self.parent.for_each(visit)
    }

    fn render(&self) -> String {
        self.parent.render()
    }
}

impl<M: LevelManager> fmt::Display for SubLevels<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<M> fmt::Debug for SubLevels<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubLevels")
            .field("prefix", &self.prefix)
            .finish()
    }
}
