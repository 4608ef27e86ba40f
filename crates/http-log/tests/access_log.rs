//! Integration tests for the access-logging middleware.
//!
//! These tests drive the layered service with in-memory requests and
//! verify the emitted event's fields, the noop and username headers, and
//! the streamed byte accounting.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use tower::{Layer, Service, ServiceExt, service_fn};

use http_log::{AccessLogLayer, AccessLogOptions, HEADER_NOOP, HEADER_USERNAME};
use logging::{FieldValue, LogEvent, Logger, Severity};
use test_support::CapturingSink;

type TestRequest = Request<Full<Bytes>>;

fn ok_with_body(
    body: &'static [u8],
) -> impl Service<TestRequest, Response = Response<Full<Bytes>>, Error = Infallible> + Clone {
    service_fn(move |_req: TestRequest| async move {
        Ok(Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from_static(body)))
            .expect("static response builds"))
    })
}

fn field<'e>(event: &'e LogEvent, key: &str) -> &'e FieldValue {
    &event
        .fields
        .iter()
        .find(|f| f.key == key)
        .unwrap_or_else(|| panic!("missing field {key}: {:?}", event.fields))
        .value
}

async fn drive(
    layer: AccessLogLayer,
    request: TestRequest,
    body: &'static [u8],
) -> Bytes {
    let service = layer.layer(ok_with_body(body));
    let response = service.oneshot(request).await.expect("request succeeds");
    response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
}

/// Verifies one event per request with true status and size fields.
#[tokio::test]
async fn emits_single_event_with_status_and_size() {
    let sink = CapturingSink::shared();
    let layer = AccessLogLayer::new(Logger::new("HTTP", sink.clone()));

    let request = Request::builder()
        .method("GET")
        .uri("/index.html?q=1")
        .header("user-agent", "curl/8.5")
        .body(Full::new(Bytes::new()))
        .expect("request builds");

    let body = drive(layer, request, b"hello world").await;
    assert_eq!(&body[..], b"hello world");

    let events = sink.events();
    assert_eq!(events.len(), 1, "events: {events:?}");

    let event = &events[0];
    assert_eq!(event.severity, Severity::Info);
    assert_eq!(event.message, "Request");
    assert_eq!(*field(event, "method"), FieldValue::from("GET"));
    assert_eq!(*field(event, "uri"), FieldValue::from("/index.html?q=1"));
    assert_eq!(*field(event, "proto"), FieldValue::from("HTTP/1.1"));
    assert_eq!(*field(event, "status"), FieldValue::from(200_u16));
    assert_eq!(*field(event, "size"), FieldValue::from(11_u64));
    assert_eq!(*field(event, "user-agent"), FieldValue::from("curl/8.5"));
    assert_eq!(*field(event, "username"), FieldValue::from("-"));
}

/// Verifies the noop header suppresses the event and is stripped before
/// the inner service runs.
#[tokio::test]
async fn noop_header_suppresses_event() {
    let sink = CapturingSink::shared();
    let layer = AccessLogLayer::new(Logger::new("HTTP", sink.clone()));

    let seen_noop = Arc::new(std::sync::Mutex::new(None));
    let probe = {
        let seen_noop = Arc::clone(&seen_noop);
        service_fn(move |req: TestRequest| {
            let seen_noop = Arc::clone(&seen_noop);
            async move {
                *seen_noop.lock().expect("probe lock") =
                    Some(req.headers().contains_key(HEADER_NOOP));
                Ok::<_, Infallible>(Response::new(Full::new(Bytes::new())))
            }
        })
    };

    let request = Request::builder()
        .uri("/quiet")
        .header(HEADER_NOOP, "1")
        .body(Full::new(Bytes::new()))
        .expect("request builds");

    let response = layer
        .layer(probe)
        .oneshot(request)
        .await
        .expect("request succeeds");
    response.into_body().collect().await.expect("body collects");

    assert_eq!(*seen_noop.lock().expect("probe lock"), Some(false));
    assert!(sink.is_empty(), "events: {:?}", sink.events());
}

/// Verifies the username header lands sanitized in the event.
#[tokio::test]
async fn username_header_is_sanitized() {
    let sink = CapturingSink::shared();
    let layer = AccessLogLayer::new(Logger::new("HTTP", sink.clone()));

    let request = Request::builder()
        .uri("/")
        .header(HEADER_USERNAME, "<admin>")
        .body(Full::new(Bytes::new()))
        .expect("request builds");

    drive(layer, request, b"").await;

    let events = sink.events();
    assert_eq!(
        *field(&events[0], "username"),
        FieldValue::from("&lt;admin&gt;")
    );
}

/// Verifies the peer address extension feeds the host field.
#[tokio::test]
async fn peer_address_extension_feeds_host() {
    let sink = CapturingSink::shared();
    let layer = AccessLogLayer::new(Logger::new("HTTP", sink.clone()));

    let peer: SocketAddr = "127.0.0.1:54321".parse().expect("addr parses");
    let mut request = Request::builder()
        .uri("/")
        .body(Full::new(Bytes::new()))
        .expect("request builds");
    request.extensions_mut().insert(peer);

    drive(layer, request, b"").await;

    let events = sink.events();
    assert_eq!(*field(&events[0], "host"), FieldValue::from("127.0.0.1"));
}

/// Verifies option toggles add and remove fields.
#[tokio::test]
async fn options_control_optional_fields() {
    let sink = CapturingSink::shared();
    let layer = AccessLogLayer::new(Logger::new("HTTP", sink.clone())).options(
        AccessLogOptions::new()
            .timestamp(false)
            .timing(false)
            .forwarded_for(true),
    );

    let request = Request::builder()
        .uri("/")
        .header("x-forwarded-for", "10.0.0.9")
        .body(Full::new(Bytes::new()))
        .expect("request builds");

    drive(layer, request, b"").await;

    let event = &sink.events()[0];
    assert!(event.fields.iter().all(|f| f.key != "timestamp"));
    assert!(event.fields.iter().all(|f| f.key != "request-time"));
    assert_eq!(
        *field(event, "forwarded_for"),
        FieldValue::from("10.0.0.9")
    );
}

/// Verifies the default option set carries timestamp and timing fields.
#[tokio::test]
async fn default_options_carry_timestamp_and_timing() {
    let sink = CapturingSink::shared();
    let layer = AccessLogLayer::new(Logger::new("HTTP", sink.clone()));

    let request = Request::builder()
        .uri("/")
        .body(Full::new(Bytes::new()))
        .expect("request builds");

    drive(layer, request, b"").await;

    let event = &sink.events()[0];
    assert!(event.fields.iter().any(|f| f.key == "timestamp"));
    assert!(
        matches!(*field(event, "request-time"), FieldValue::Float(secs) if secs >= 0.0)
    );
    assert!(event.fields.iter().all(|f| f.key != "forwarded_for"));
}

/// Verifies the event fires through a registry-gated handle only when the
/// threshold admits it, making access logging retunable at runtime.
#[tokio::test]
async fn event_respects_gated_handle() {
    use levels_like_gate::gated_logger;

    let (logger, sink, threshold) = gated_logger();
    let layer = AccessLogLayer::new(logger);

    let request = Request::builder()
        .uri("/")
        .body(Full::new(Bytes::new()))
        .expect("request builds");
    drive(layer.clone(), request, b"").await;
    assert_eq!(sink.len(), 1);

    threshold.set(Severity::Error);
    let request = Request::builder()
        .uri("/")
        .body(Full::new(Bytes::new()))
        .expect("request builds");
    drive(layer, request, b"").await;
    assert_eq!(sink.len(), 1, "suppressed event still emitted");
}

/// Minimal stand-in for the level registry's gate so this crate's tests
/// stay decoupled from the `levels` crate.
mod levels_like_gate {
    use std::io;
    use std::sync::Arc;

    use logging::{AtomicSeverity, EventSink, LogEvent, Logger, Severity};
    use test_support::CapturingSink;

    struct Gate {
        threshold: Arc<AtomicSeverity>,
        inner: Arc<CapturingSink>,
    }

    impl EventSink for Gate {
        fn accepts(&self, severity: Severity) -> bool {
            self.threshold.enabled(severity)
        }

        fn write(&self, event: &LogEvent) -> io::Result<()> {
            self.inner.write(event)
        }
    }

    pub fn gated_logger() -> (Logger, Arc<CapturingSink>, Arc<AtomicSeverity>) {
        let sink = CapturingSink::shared();
        let threshold = Arc::new(AtomicSeverity::new(Severity::Info));
        let gate = Gate {
            threshold: Arc::clone(&threshold),
            inner: Arc::clone(&sink),
        };
        (Logger::new("HTTP", Arc::new(gate)), sink, threshold)
    }
}
