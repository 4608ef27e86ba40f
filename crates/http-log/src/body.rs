//! crates/http-log/src/body.rs
//! Response-body wrapper that counts bytes and emits the access event.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Buf;
use chrono::{DateTime, SecondsFormat, Utc};
use http_body::{Body, Frame, SizeHint};
use pin_project_lite::pin_project;

use logging::{Field, Logger};

use crate::options::AccessLogOptions;

/// Deferred access-event state, written exactly once on drop.
///
/// Routing emission through `Drop` gives a single code path for both the
/// clean end-of-stream case and a client abandoning the response body:
/// either way the event fires with the bytes counted so far.
pub(crate) struct AccessEmitter {
    pub(crate) logger: Logger,
    pub(crate) options: AccessLogOptions,
    pub(crate) started: Instant,
    pub(crate) timestamp: Option<DateTime<Utc>>,
    pub(crate) host: String,
    pub(crate) username: String,
    pub(crate) method: String,
    pub(crate) uri: String,
    pub(crate) proto: &'static str,
    pub(crate) referer: String,
    pub(crate) user_agent: String,
    pub(crate) forwarded_for: Option<String>,
    pub(crate) status: u16,
    pub(crate) bytes: u64,
}

impl AccessEmitter {
    fn count(&mut self, bytes: u64) {
        self.bytes += bytes;
    }
}

impl Drop for AccessEmitter {
    fn drop(&mut self) {
        let mut fields = Vec::with_capacity(12);
        fields.push(Field::new("host", self.host.as_str()));
        fields.push(Field::new("username", self.username.as_str()));
        if let Some(timestamp) = self.timestamp {
            fields.push(Field::new(
                "timestamp",
                timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ));
        }
        fields.push(Field::new("method", self.method.as_str()));
        fields.push(Field::new("uri", self.uri.as_str()));
        fields.push(Field::new("proto", self.proto));
        fields.push(Field::new("status", self.status));
        fields.push(Field::new("size", self.bytes));
        fields.push(Field::new("referer", self.referer.as_str()));
        fields.push(Field::new("user-agent", self.user_agent.as_str()));
        if self.options.include_timing {
            fields.push(Field::new(
                "request-time",
                self.started.elapsed().as_secs_f64(),
            ));
        }
        if let Some(forwarded_for) = &self.forwarded_for {
            fields.push(Field::new("forwarded_for", forwarded_for.as_str()));
        }

        // Emission must never disturb the request path; a sink failure
        // here has nowhere useful to go.
        let _ = self
            .logger
            .log_with(self.options.severity, "Request", fields);
    }
}

pin_project! {
    /// A response body that counts data bytes as they stream and fires
    /// the pending access event when the stream ends or is dropped.
    pub struct CountingBody<B> {
        #[pin]
        inner: B,
        emitter: Option<AccessEmitter>,
    }
}

impl<B> CountingBody<B> {
    pub(crate) fn new(inner: B, emitter: Option<AccessEmitter>) -> Self {
        Self { inner, emitter }
    }
}

impl<B: Body> Body for CountingBody<B> {
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.project();
        match this.inner.poll_frame(cx) {
            Poll::Ready(Some(Ok(frame))) => {
                if let (Some(emitter), Some(data)) = (this.emitter.as_mut(), frame.data_ref()) {
                    emitter.count(data.remaining() as u64);
                }
                Poll::Ready(Some(Ok(frame)))
            }
            Poll::Ready(Some(Err(error))) => {
                // The response is over; emit with what was counted.
                drop(this.emitter.take());
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(None) => {
                drop(this.emitter.take());
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
