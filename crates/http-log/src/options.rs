//! crates/http-log/src/options.rs
//! Field toggles for emitted access events.

use logging::Severity;

/// Controls which optional fields an access event carries and the
/// severity it is emitted at.
///
/// Timing and timestamp default on; the forwarded-for field defaults off
/// because it reflects unauthenticated client input and deployments
/// behind a trusted proxy opt into it deliberately.
#[derive(Clone, Debug)]
pub struct AccessLogOptions {
    /// Include a `request-time` duration field.
    pub include_timing: bool,
    /// Include an RFC 3339 `timestamp` field.
    pub include_timestamp: bool,
    /// Include the `X-Forwarded-For` header as a `forwarded_for` field.
    pub include_forwarded_for: bool,
    /// Severity access events are emitted at.
    pub severity: Severity,
}

impl Default for AccessLogOptions {
    fn default() -> Self {
        Self {
            include_timing: true,
            include_timestamp: true,
            include_forwarded_for: false,
            severity: Severity::Info,
        }
    }
}

impl AccessLogOptions {
    /// Creates the default option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the `request-time` field is included.
    #[must_use]
    pub const fn timing(mut self, include: bool) -> Self {
        self.include_timing = include;
        self
    }

    /// Sets whether the `timestamp` field is included.
    #[must_use]
    pub const fn timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    /// Sets whether the `forwarded_for` field is included.
    #[must_use]
    pub const fn forwarded_for(mut self, include: bool) -> Self {
        self.include_forwarded_for = include;
        self
    }

    /// Sets the severity access events are emitted at.
    #[must_use]
    pub const fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_toggles() {
        let options = AccessLogOptions::default();
        assert!(options.include_timing);
        assert!(options.include_timestamp);
        assert!(!options.include_forwarded_for);
        assert_eq!(options.severity, Severity::Info);
    }

    #[test]
    fn builders_chain() {
        let options = AccessLogOptions::new()
            .timing(false)
            .forwarded_for(true)
            .severity(Severity::Debug);
        assert!(!options.include_timing);
        assert!(options.include_forwarded_for);
        assert_eq!(options.severity, Severity::Debug);
    }
}
