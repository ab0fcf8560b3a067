//! Syntactic URL rules for source references.
//!
//! Only the shape of a URL is checked here, nothing is ever fetched. A URL is accepted when it
//! starts with a recognized scheme followed by a dot-separated sequence of DNS labels; whatever
//! follows the host (port, path, query, fragment) is not inspected.

use std::{fmt, sync::LazyLock};

use regex::Regex;

/// Maximum stored length of a source URL, in characters.
pub const URL_MAX_LEN: usize = 500;

/// Scheme prepended to URLs entered without one.
pub const DEFAULT_SCHEME: &str = "http://";

/// Schemes a stored URL may begin with.
pub const RECOGNIZED_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

static URL_HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?|ftp)://(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?",
    )
    .expect("URL host pattern is a valid regex")
});

/// Syntactic problem found on a stored URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlIssueKind {
    /// URL does not begin with `http://`, `https://` or `ftp://`
    MissingScheme,
    /// URL contains whitespace characters
    ContainsWhitespace,
    /// URL is longer than [`URL_MAX_LEN`]
    TooLong,
    /// Host portion does not match the hostname pattern
    InvalidHost,
}

impl UrlIssueKind {
    /// Human-readable description used in audit reports.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingScheme => "missing or unrecognized scheme",
            Self::ContainsWhitespace => "contains whitespace",
            Self::TooLong => "exceeds maximum length",
            Self::InvalidHost => "malformed host name",
        }
    }
}

impl fmt::Display for UrlIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Returns true if the URL begins with a recognized scheme, ignoring ASCII case.
pub fn has_recognized_scheme(url: &str) -> bool {
    RECOGNIZED_SCHEMES.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Returns the URL with [`DEFAULT_SCHEME`] prepended when it lacks a recognized scheme.
pub fn with_default_scheme(url: &str) -> String {
    if has_recognized_scheme(url) {
        url.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, url)
    }
}

/// Returns true if the URL's scheme and host match the hostname pattern.
pub fn matches_host_pattern(url: &str) -> bool {
    URL_HOST_PATTERN.is_match(url)
}

/// Classifies the first syntactic issue of a stored URL, if any.
///
/// Checks run in order: scheme, whitespace, length, host.
pub fn url_issue(url: &str) -> Option<UrlIssueKind> {
    if !has_recognized_scheme(url) {
        return Some(UrlIssueKind::MissingScheme);
    }
    if url.chars().any(char::is_whitespace) {
        return Some(UrlIssueKind::ContainsWhitespace);
    }
    if url.chars().count() > URL_MAX_LEN {
        return Some(UrlIssueKind::TooLong);
    }
    if !matches_host_pattern(url) {
        return Some(UrlIssueKind::InvalidHost);
    }

    None
}
