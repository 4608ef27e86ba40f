#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the structured-event primitives shared across the
//! logtool workspace: an ordered [`Severity`] scale with an explicit
//! [`Severity::Invalid`] sentinel, the lock-free [`AtomicSeverity`] threshold
//! cell, the [`LogEvent`] record type, the [`EventSink`] output contract, and
//! the named [`Logger`] handle that emits events through a sink.
//!
//! The crate deliberately stops at the event boundary. Deciding *which*
//! events a component may emit at runtime is the job of the `levels` crate,
//! which decorates sinks from this crate with per-name filtering gates.
//!
//! # Design
//!
//! Emission follows a check-then-commit protocol: [`Logger`] first asks the
//! sink whether it [`accepts`](EventSink::accepts) the event's severity, and
//! only then calls [`write`](EventSink::write). The two steps are separable
//! on purpose so decorating sinks can gate cheaply per event while batching
//! or aggregating layers underneath still see every committed write.
//!
//! # Invariants
//!
//! - [`Severity`] orders `Trace < Debug < Info < Warn < Error < Fatal <
//!   Invalid`; the sentinel is never produced by parsing and sorts above
//!   every real severity, so a threshold holding it suppresses all events.
//! - [`AtomicSeverity`] is safe to read and write from arbitrary threads
//!   without external locking.
//! - Sinks never originate severity decisions on `write`; a call to
//!   [`write`](EventSink::write) is unconditional once made.
//!
//! # Errors
//!
//! Severity parsing reports [`SeverityParseError`]; sink I/O surfaces
//! [`std::io::Error`] values unchanged from the underlying writer. Nothing
//! in this crate panics on malformed input.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use logging::{Logger, Severity, WriterSink};
//!
//! let sink = Arc::new(WriterSink::new(Vec::new()));
//! let logger = Logger::new("Startup", sink.clone());
//!
//! logger.info("listening")?;
//! logger.log(Severity::Warn, "clock skew detected")?;
//!
//! drop(logger);
//! let output = String::from_utf8(Arc::into_inner(sink).unwrap().into_inner()).unwrap();
//! assert!(output.contains("Startup: listening"));
//! # Ok::<(), std::io::Error>(())
//! ```

mod event;
mod logger;
mod severity;
mod sink;

pub use crate::event::{Field, FieldValue, LogEvent};
pub use crate::logger::Logger;
pub use crate::severity::{AtomicSeverity, Severity, SeverityParseError, error_severity};
pub use crate::sink::{EventSink, WriterSink};
