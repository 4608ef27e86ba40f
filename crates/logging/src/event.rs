//! crates/logging/src/event.rs
//! The structured event record carried from logger handles to sinks.

use std::fmt;
use std::sync::Arc;

use crate::severity::Severity;

/// One structured log event.
///
/// Events carry the emitting logger's name so downstream sinks can group or
/// route output per component without any side-channel state.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEvent {
    /// Importance of the event.
    pub severity: Severity,
    /// Name of the logger handle that emitted the event.
    pub logger: Arc<str>,
    /// Human-readable message.
    pub message: String,
    /// Structured key/value context attached at the call site.
    pub fields: Vec<Field>,
}

impl LogEvent {
    /// Creates an event with no fields.
    pub fn new(
        severity: Severity,
        logger: impl Into<Arc<str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            logger: logger.into(),
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Appends one field, builder-style.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push(Field::new(key, value));
        self
    }
}

/// A single key/value pair attached to a [`LogEvent`].
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Field name.
    pub key: String,
    /// Field value.
    pub value: FieldValue,
}

impl Field {
    /// Creates a field from any value convertible into a [`FieldValue`].
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Typed field values.
///
/// Strings that contain whitespace, `=`, or `"` render quoted so field
/// output stays unambiguous for line-oriented consumers.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Text value.
    Str(String),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    Uint(u64),
    /// Boolean value.
    Bool(bool),
    /// Floating-point value.
    Float(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => {
                if value.is_empty()
                    || value
                        .chars()
                        .any(|c| c.is_whitespace() || c == '=' || c == '"')
                {
                    write!(f, "{value:?}")
                } else {
                    f.write_str(value)
                }
            }
            Self::Int(value) => value.fmt(f),
            Self::Uint(value) => value.fmt(f),
            Self::Bool(value) => value.fmt(f),
            Self::Float(value) => value.fmt(f),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Uint(u64::from(value))
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        Self::Uint(u64::from(value))
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
