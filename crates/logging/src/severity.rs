//! crates/logging/src/severity.rs
//! Ordered severity scale and the atomically-adjustable threshold cell.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use thiserror::Error;

/// Importance of a log event, ordered from least to most severe.
///
/// [`Severity::Invalid`] is a sentinel, not a real level: it is never
/// produced by [`FromStr`], displays as `invalid`, and orders above
/// [`Severity::Fatal`] so that a threshold holding it admits nothing.
/// It exists to make a failed runtime severity push visible to operators
/// instead of silently defaulting.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Fine-grained tracing output.
    Trace = 0,
    /// Diagnostic output useful during development.
    Debug = 1,
    /// Routine operational messages. The default threshold.
    Info = 2,
    /// Something unexpected that the process can absorb.
    Warn = 3,
    /// A failure the current operation could not recover from.
    Error = 4,
    /// A failure the process cannot continue past.
    Fatal = 5,
    /// Sentinel marking a threshold with no admissible severity.
    Invalid = 6,
}

impl Severity {
    /// Returns the lowercase token for this severity.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::Warn.as_str(), "warn");
    /// assert_eq!(Severity::Invalid.as_str(), "invalid");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Invalid => "invalid",
        }
    }

    /// Maps a raw discriminant back onto the scale.
    ///
    /// Out-of-range values collapse to [`Severity::Invalid`]; the cell
    /// representation below guarantees they cannot occur in practice.
    const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Trace,
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            5 => Self::Fatal,
            _ => Self::Invalid,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity token cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized severity {token:?}")]
pub struct SeverityParseError {
    /// The token that failed to parse.
    pub token: String,
}

impl FromStr for Severity {
    type Err = SeverityParseError;

    /// Parses a lowercase severity token, case-insensitively.
    ///
    /// `warning` is accepted as an alias for `warn`. The `invalid` sentinel
    /// is deliberately rejected: it can only be reached through a literal
    /// [`Severity::Invalid`] value, never through operator-supplied text.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let parsed = [
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Fatal,
        ]
        .into_iter()
        .find(|severity| token.eq_ignore_ascii_case(severity.as_str()));

        match parsed {
            Some(severity) => Ok(severity),
            None if token.eq_ignore_ascii_case("warning") => Ok(Self::Warn),
            None => Err(SeverityParseError {
                token: token.to_owned(),
            }),
        }
    }
}

/// Classifies an operation result as [`Severity::Error`] or
/// [`Severity::Info`].
///
/// Convenience for access and audit logs that record every outcome but want
/// failures to surface at a higher severity.
///
/// # Examples
///
/// ```
/// use logging::{Severity, error_severity};
///
/// let ok: Result<(), std::io::Error> = Ok(());
/// assert_eq!(error_severity(&ok), Severity::Info);
/// ```
#[must_use]
pub fn error_severity<T, E>(result: &Result<T, E>) -> Severity {
    if result.is_ok() {
        Severity::Info
    } else {
        Severity::Error
    }
}

/// A severity threshold safe for concurrent mutation and reads.
///
/// The cell is the unit of runtime verbosity control: the `levels` registry
/// hands out shared references to cells, filtering gates consult them on
/// every event, and bulk updates store new values into them. Reads and
/// writes use relaxed ordering; a threshold is an independent gate value,
/// not a synchronization edge between threads.
#[derive(Debug)]
pub struct AtomicSeverity(AtomicU8);

impl AtomicSeverity {
    /// Creates a cell holding `severity`.
    #[must_use]
    pub const fn new(severity: Severity) -> Self {
        Self(AtomicU8::new(severity as u8))
    }

    /// Returns the current threshold.
    #[must_use]
    pub fn get(&self) -> Severity {
        Severity::from_index(self.0.load(Ordering::Relaxed))
    }

    /// Replaces the threshold.
    pub fn set(&self, severity: Severity) {
        self.0.store(severity as u8, Ordering::Relaxed);
    }

    /// Reports whether an event of `severity` clears the threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{AtomicSeverity, Severity};
    ///
    /// let cell = AtomicSeverity::new(Severity::Warn);
    /// assert!(!cell.enabled(Severity::Info));
    /// assert!(cell.enabled(Severity::Error));
    /// ```
    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.get()
    }
}

impl Default for AtomicSeverity {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}

impl From<Severity> for AtomicSeverity {
    fn from(severity: Severity) -> Self {
        Self::new(severity)
    }
}

impl fmt::Display for AtomicSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}
