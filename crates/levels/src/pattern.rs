//! crates/levels/src/pattern.rs
//! Wildcard matching for bulk threshold updates.

/// Tests whether a stored entry name matches an update pattern.
///
/// The rules, evaluated in order:
///
/// 1. ASCII-case-insensitive exact equality matches.
/// 2. A bare `*` matches every name.
/// 3. A pattern wrapped in `*` on both ends matches names containing the
///    inner substring.
/// 4. A leading `*` matches names ending with the remainder.
/// 5. A trailing `*` matches names starting with the remainder.
/// 6. Anything else does not match.
///
/// Only the exact rule folds case; wildcard remainders compare
/// case-sensitively. `*` has no special meaning anywhere but the ends of
/// the pattern.
///
/// # Examples
///
/// ```
/// use levels::matches_pattern;
///
/// assert!(matches_pattern("Engine.Delta", "engine.delta"));
/// assert!(matches_pattern("Engine.Delta", "Engine.*"));
/// assert!(matches_pattern("Engine.Delta", "*.Delta"));
/// assert!(matches_pattern("Engine.Delta", "*ngine*"));
/// assert!(!matches_pattern("Engine.Delta", "Engine"));
/// ```
#[must_use]
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    if name.eq_ignore_ascii_case(pattern) {
        return true;
    }

    if pattern == "*" {
        return true;
    }

    match (pattern.strip_prefix('*'), pattern.strip_suffix('*')) {
        (Some(_), Some(_)) => name.contains(&pattern[1..pattern.len() - 1]),
        (Some(suffix), None) => name.ends_with(suffix),
        (None, Some(prefix)) => name.starts_with(prefix),
        (None, None) => false,
    }
}
