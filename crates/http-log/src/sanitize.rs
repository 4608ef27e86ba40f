//! crates/http-log/src/sanitize.rs
//! Escapers for header-derived fields.
//!
//! Client-controlled header values end up verbatim in access events; a
//! crafted newline or NUL would otherwise let a caller forge log lines or
//! truncate them in downstream processors.

/// Escapes a user-agent value for logging.
///
/// Newlines and NULs are rendered as `\n` and `\0` escape sequences; `+`
/// folds to a space, matching the historical user-agent convention.
#[must_use]
pub fn sanitize_user_agent(user_agent: &str) -> String {
    let mut out = String::with_capacity(user_agent.len());
    for c in user_agent.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\0' => out.push_str("\\0"),
            '+' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a URI or referer value for logging.
#[must_use]
pub fn sanitize_uri(uri: &str) -> String {
    let mut out = String::with_capacity(uri.len());
    for c in uri.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML-escapes a username for logging.
#[must_use]
pub fn sanitize_username(username: &str) -> String {
    let mut out = String::with_capacity(username.len());
    for c in username.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_escapes_and_folds() {
        assert_eq!(
            sanitize_user_agent("Mozilla/5.0+(X11)\nfake: line"),
            "Mozilla/5.0 (X11)\\nfake: line"
        );
        assert_eq!(sanitize_user_agent("curl/8.5"), "curl/8.5");
    }

    #[test]
    fn uri_escapes_control_bytes() {
        assert_eq!(sanitize_uri("/a\nb\0c"), "/a\\nb\\0c");
        assert_eq!(sanitize_uri("/plain?q=1"), "/plain?q=1");
    }

    #[test]
    fn username_html_escapes() {
        assert_eq!(
            sanitize_username("<admin> & 'friends'"),
            "&lt;admin&gt; &amp; &#39;friends&#39;"
        );
        assert_eq!(sanitize_username("alice"), "alice");
    }
}
