//! crates/levels/src/spec.rs
//! Tagged severity inputs for creation options and bulk updates.

use std::sync::Arc;

use logging::{AtomicSeverity, Severity, SeverityParseError};

/// A severity value supplied to [`set_level`](crate::LevelManager::set_level)
/// or as a creation option to [`named`](crate::LevelManager::named).
///
/// The original operator surface accepts "a level, a level name, or another
/// threshold"; this models that as an explicit variant set with a single
/// resolution step instead of runtime type inspection. Resolution of a
/// [`Threshold`](Self::Threshold) reads the referenced cell's *current*
/// value - the result is a snapshot copy, never a live link.
#[derive(Clone, Debug)]
pub enum LevelSpec {
    /// A literal severity.
    Level(Severity),
    /// A textual severity token, parsed at resolution time.
    Token(String),
    /// A live threshold whose current value is copied at resolution time.
    Threshold(Arc<AtomicSeverity>),
}

impl LevelSpec {
    /// Resolves the spec to a concrete severity.
    ///
    /// # Examples
    ///
    /// ```
    /// use levels::LevelSpec;
    /// use logging::Severity;
    ///
    /// assert_eq!(LevelSpec::from("warn").resolve(), Ok(Severity::Warn));
    /// assert!(LevelSpec::from("loud").resolve().is_err());
    /// ```
    pub fn resolve(&self) -> Result<Severity, SeverityParseError> {
        match self {
            Self::Level(severity) => Ok(*severity),
            Self::Token(token) => token.parse(),
            Self::Threshold(cell) => Ok(cell.get()),
        }
    }
}

impl From<Severity> for LevelSpec {
    fn from(severity: Severity) -> Self {
        Self::Level(severity)
    }
}

impl From<&str> for LevelSpec {
    fn from(token: &str) -> Self {
        Self::Token(token.to_owned())
    }
}

impl From<String> for LevelSpec {
    fn from(token: String) -> Self {
        Self::Token(token)
    }
}

impl From<Arc<AtomicSeverity>> for LevelSpec {
    fn from(cell: Arc<AtomicSeverity>) -> Self {
        Self::Threshold(cell)
    }
}

impl From<&Arc<AtomicSeverity>> for LevelSpec {
    fn from(cell: &Arc<AtomicSeverity>) -> Self {
        Self::Threshold(Arc::clone(cell))
    }
}
