#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `http-log` wraps any [`tower::Service`] handling [`http`] requests and
//! emits exactly one structured access event per request through a
//! [`logging::Logger`] handle. The handle is requested from the level
//! registry once, at construction, and used unmodified for the process
//! lifetime; whether a given request's event is actually written is
//! decided per event by the handle's filtering gate, so operators retune
//! access-log verbosity at runtime like any other component.
//!
//! # Design
//!
//! The middleware records request metadata up front, forwards to the
//! inner service, and defers emission until the response *body* finishes
//! streaming - that is the only point where the true byte count is known.
//! [`CountingBody`] wraps the response body, counts data frames, and
//! emits on end-of-stream; if the client abandons the body early the
//! event still fires on drop with the bytes counted so far.
//!
//! Two request headers adjust behavior, mirroring the conventions of the
//! surrounding stack: [`HEADER_USERNAME`] carries the authenticated user
//! recorded in the `username` field, and [`HEADER_NOOP`] suppresses the
//! event for that request entirely. Both are stripped before the inner
//! service runs. Header-derived fields pass through the sanitizers in
//! this crate so log-line injection via crafted headers is neutralized.
//!
//! # Errors
//!
//! The middleware never fails a request on its own: inner service errors
//! and body errors pass through unchanged, and sink I/O failures during
//! emission are discarded rather than surfaced into the request path.

mod body;
mod layer;
mod options;
mod sanitize;

pub use crate::body::CountingBody;
pub use crate::layer::{AccessLogLayer, AccessLogService, HEADER_NOOP, HEADER_USERNAME};
pub use crate::options::AccessLogOptions;
pub use crate::sanitize::{sanitize_uri, sanitize_user_agent, sanitize_username};
