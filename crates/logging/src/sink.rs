//! crates/logging/src/sink.rs
//! The sink contract and the line-rendering writer sink.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::event::LogEvent;
use crate::severity::Severity;

/// Destination for committed log events.
///
/// The contract splits admission from output: [`accepts`](Self::accepts) is
/// the cheap per-event check callers run first, while
/// [`write`](Self::write) forwards unconditionally once called. Decorators
/// such as the `levels` crate's filtering gate override `accepts` and pass
/// everything else through, so batching layers underneath still observe
/// every committed write in order.
pub trait EventSink: Send + Sync {
    /// Reports whether an event of `severity` should be written.
    ///
    /// The default accepts everything; decorators narrow it.
    fn accepts(&self, severity: Severity) -> bool {
        let _ = severity;
        true
    }

    /// Writes one event. I/O failures surface unchanged from the
    /// underlying writer.
    fn write(&self, event: &LogEvent) -> io::Result<()>;

    /// Flushes any buffered output.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// Releases any resources held by the sink. Final flush included.
    fn close(&self) -> io::Result<()> {
        self.flush()
    }
}

/// Renders events as single text lines into any [`Write`] target.
///
/// Output format is `severity logger: message key=value ...`, one event per
/// line. The writer sits behind a [`Mutex`] so one sink can serve logger
/// handles on arbitrary threads; a poisoned lock is recovered rather than
/// propagated because a half-written diagnostic line is preferable to
/// losing the stream.
///
/// # Examples
///
/// ```
/// use logging::{EventSink, LogEvent, Severity, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// let event = LogEvent::new(Severity::Info, "Db", "connected").with_field("pool", 4_u32);
/// sink.write(&event)?;
///
/// assert_eq!(
///     String::from_utf8(sink.into_inner()).unwrap(),
///     "info Db: connected pool=4\n",
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W> WriterSink<W> {
    /// Creates a sink over `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> EventSink for WriterSink<W>
where
    W: Write + Send,
{
    fn write(&self, event: &LogEvent) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        write!(writer, "{} {}: {}", event.severity, event.logger, event.message)?;
        for field in &event.fields {
            write!(writer, " {field}")?;
        }
        writeln!(writer)
    }

    fn flush(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}
