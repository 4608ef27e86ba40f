//! crates/http-log/src/layer.rs
//! The tower layer and service wrapping a handler with access logging.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use chrono::Utc;
use http::{HeaderMap, Request, Response, Version};
use http_body::Body;
use tower::{Layer, Service};

use logging::Logger;

use crate::body::{AccessEmitter, CountingBody};
use crate::options::AccessLogOptions;
use crate::sanitize::{sanitize_uri, sanitize_user_agent, sanitize_username};

/// Header carrying the authenticated username, added by authentication
/// middleware earlier in the stack.
pub const HEADER_USERNAME: &str = "x-logging-username";

/// Header suppressing the access event for a single request. Stripped
/// before the inner service runs.
pub const HEADER_NOOP: &str = "x-logging-noop";

/// A [`Layer`] attaching access logging to any inner service.
///
/// # Examples
///
/// ```
/// use http_log::{AccessLogLayer, AccessLogOptions};
/// use logging::{Logger, Severity, WriterSink};
/// use std::sync::Arc;
///
/// let logger = Logger::new("HTTP", Arc::new(WriterSink::new(Vec::new())));
/// let layer = AccessLogLayer::new(logger)
///     .options(AccessLogOptions::new().timestamp(false));
/// # let _ = layer;
/// ```
#[derive(Clone)]
pub struct AccessLogLayer {
    logger: Logger,
    options: AccessLogOptions,
}

impl AccessLogLayer {
    /// Creates a layer emitting through `logger` with default options.
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            options: AccessLogOptions::default(),
        }
    }

    /// Replaces the option set.
    #[must_use]
    pub fn options(mut self, options: AccessLogOptions) -> Self {
        self.options = options;
        self
    }
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogService {
            inner,
            logger: self.logger.clone(),
            options: self.options.clone(),
        }
    }
}

/// The service produced by [`AccessLogLayer`].
#[derive(Clone)]
pub struct AccessLogService<S> {
    inner: S,
    logger: Logger,
    options: AccessLogOptions,
}

fn protocol(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/?",
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for AccessLogService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ResBody: Body + Send + 'static,
{
    type Response = Response<CountingBody<ResBody>>;
    type Error = S::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let noop = request.headers().contains_key(HEADER_NOOP);
        request.headers_mut().remove(HEADER_NOOP);

        let emitter = (!noop).then(|| {
            let headers = request.headers();
            AccessEmitter {
                logger: self.logger.clone(),
                options: self.options.clone(),
                started: Instant::now(),
                timestamp: self.options.include_timestamp.then(Utc::now),
                host: request
                    .extensions()
                    .get::<SocketAddr>()
                    .map_or_else(|| "-".to_owned(), |addr| addr.ip().to_string()),
                username: header_str(headers, HEADER_USERNAME)
                    .map_or_else(|| "-".to_owned(), sanitize_username),
                method: request.method().to_string(),
                uri: sanitize_uri(&request.uri().to_string()),
                proto: protocol(request.version()),
                referer: sanitize_uri(header_str(headers, "referer").unwrap_or_default()),
                user_agent: sanitize_user_agent(
                    header_str(headers, "user-agent").unwrap_or_default(),
                ),
                forwarded_for: self.options.include_forwarded_for.then(|| {
                    header_str(headers, "x-forwarded-for")
                        .unwrap_or_default()
                        .to_owned()
                }),
                status: 0,
                bytes: 0,
            }
        });

        let future = self.inner.call(request);
        Box::pin(async move {
            let response = future.await?;
            let (parts, body) = response.into_parts();
            let emitter = emitter.map(|mut emitter| {
                emitter.status = parts.status.as_u16();
                emitter
            });
            Ok(Response::from_parts(parts, CountingBody::new(body, emitter)))
        })
    }
}
