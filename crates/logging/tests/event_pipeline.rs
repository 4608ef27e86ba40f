//! Integration tests for the logger-to-sink pipeline.
//!
//! These tests verify end-to-end emission through a writer sink: line
//! formatting, the check-then-commit split, and I/O error passthrough.

use std::io::{self, Write};
use std::sync::Arc;

use logging::{EventSink, LogEvent, Logger, Severity, WriterSink};

/// Verifies emitted lines carry severity, name, message, and fields.
#[test]
fn lines_carry_name_and_fields() {
    let sink = Arc::new(WriterSink::new(Vec::new()));
    let logger = Logger::new("Daemon.Session", sink.clone());

    logger
        .log_with(
            Severity::Warn,
            "slow client",
            vec![
                logging::Field::new("peer", "10.0.0.7"),
                logging::Field::new("lag_ms", 1500_u64),
            ],
        )
        .expect("emit succeeds");
    drop(logger);

    let output = String::from_utf8(
        Arc::into_inner(sink).expect("sole owner").into_inner(),
    )
    .expect("utf8 output");
    assert_eq!(
        output,
        "warn Daemon.Session: slow client peer=10.0.0.7 lag_ms=1500\n"
    );
}

/// A sink decorator admitting only warnings and above, standing in for
/// the level gate the `levels` crate layers over this contract.
struct WarnOnly(Arc<WriterSink<Vec<u8>>>);

impl EventSink for WarnOnly {
    fn accepts(&self, severity: Severity) -> bool {
        severity >= Severity::Warn
    }

    fn write(&self, event: &LogEvent) -> io::Result<()> {
        self.0.write(event)
    }
}

/// Verifies rejected events cost no write while accepted ones flow
/// through the decorator unchanged.
#[test]
fn decorated_sink_gates_before_write() {
    let inner = Arc::new(WriterSink::new(Vec::new()));
    let logger = Logger::new("Gated", Arc::new(WarnOnly(inner.clone())));

    assert!(!logger.enabled(Severity::Info));
    logger.info("dropped").expect("suppressed emit is ok");
    logger.error("kept").expect("emit succeeds");
    drop(logger);

    let output = String::from_utf8(
        Arc::into_inner(inner).expect("sole owner").into_inner(),
    )
    .expect("utf8 output");
    assert_eq!(output, "error Gated: kept\n");
}

/// A writer that refuses every byte.
struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "refused"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "refused"))
    }
}

/// Verifies writer failures surface unchanged to the emitting caller.
#[test]
fn writer_errors_pass_through() {
    let logger = Logger::new("Broken", Arc::new(WriterSink::new(BrokenWriter)));

    let err = logger.info("will fail").expect_err("write must fail");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

    let err = logger.flush().expect_err("flush must fail");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
