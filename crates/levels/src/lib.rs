#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `levels` is the runtime verbosity control plane of the logtool
//! workspace: a registry that maps component names to independently
//! adjustable severity thresholds. Subsystems request named logger handles
//! once; operators retune any threshold later - by exact name or by
//! wildcard pattern - and every handle already in the wild honors the new
//! value on its next event, with no re-acquisition and no restart.
//!
//! # Design
//!
//! [`LevelRegistry`] owns the name-to-threshold map behind a single
//! readers/writer lock. Each handle it issues wraps the base sink in a
//! [`LevelGate`] bound to that entry's [`logging::AtomicSeverity`] cell, so
//! the per-event admission check reads live state without touching the
//! registry lock. [`SubLevels`] is a prefix-scoped facade implementing the
//! same [`LevelManager`] contract and delegating to any parent manager,
//! which makes sub-registries nest arbitrarily and behave exactly like the
//! registry they wrap.
//!
//! # Invariants
//!
//! - At most one entry per exact name; re-requesting a name returns the
//!   existing threshold cell.
//! - Pattern matching and threshold mutation in
//!   [`set_level`](LevelManager::set_level) share one exclusive critical
//!   section, so concurrent bulk updates serialize and readers never
//!   observe a partially applied pattern.
//! - Removing an entry only drops it from lookup, enumeration, and bulk
//!   matching; handles issued earlier keep their own reference to the cell
//!   and continue to log.
//! - [`render`](LevelManager::render) output is sorted by name and stable
//!   across calls absent mutation.
//!
//! # Errors
//!
//! Nothing here panics on bad input. A malformed severity value makes
//! [`set_level`](LevelManager::set_level) return `false` without mutating
//! anything; lookup misses are reported as booleans; callback errors from
//! [`for_each`](LevelManager::for_each) and sink I/O errors propagate
//! unchanged.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use levels::{LevelManager, LevelRegistry, LevelSpec, SubLevels};
//! use logging::{Severity, WriterSink};
//!
//! let sink = Arc::new(WriterSink::new(Vec::new()));
//! let registry = LevelRegistry::new(sink, Severity::Info);
//!
//! let transfer = registry.named("Transfer", &[]);
//! assert!(transfer.enabled(Severity::Info));
//! assert!(!transfer.enabled(Severity::Debug));
//!
//! // Retune the already-issued handle at runtime.
//! assert!(registry.set_level("Transfer", LevelSpec::from(Severity::Debug)));
//! assert!(transfer.enabled(Severity::Debug));
//!
//! // Scoped names through a sub-registry.
//! let child = SubLevels::new("Child", &registry);
//! child.named("Core", &[]);
//! assert!(registry.contains("Child.Core"));
//! ```

mod gate;
mod manager;
mod pattern;
mod registry;
mod spec;
mod sub;

#[cfg(feature = "tracing")]
mod bridge;

pub use crate::gate::LevelGate;
pub use crate::manager::{IterError, LevelManager};
pub use crate::pattern::matches_pattern;
pub use crate::registry::{INTERNAL_LOGGER, LevelRegistry};
pub use crate::spec::LevelSpec;
pub use crate::sub::SubLevels;

#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub use crate::bridge::RegistryLayer;
