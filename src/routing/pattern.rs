//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile declared path patterns (`/users/{id}`) into segment lists
//! - Match an incoming path against a compiled pattern
//! - Extract named path parameters from `{name}` placeholders
//!
//! # Design Decisions
//! - Patterns are compiled once at registration, not per request
//! - Literal segments match case-sensitively
//! - A placeholder captures exactly one non-empty segment (no `/` inside)
//! - Segment counts must be equal; no wildcard or catch-all support
//! - No regex to guarantee O(n) matching

use std::collections::HashMap;
use std::fmt;

/// Extracted path parameters, keyed by placeholder name.
pub type PathParams = HashMap<String, String>;

/// One compiled segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Must match the actual segment byte-for-byte.
    Literal(String),
    /// Captures the actual segment under the given name.
    Param(String),
}

/// A declared path pattern, compiled for per-request matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern string.
    ///
    /// A segment is a placeholder iff it starts with `{`, ends with `}` and
    /// names at least one character; everything else (including `{}`) is a
    /// literal.
    pub fn parse(pattern: impl Into<String>) -> Self {
        let raw = pattern.into();
        let segments = raw
            .split('/')
            .map(|seg| {
                if seg.len() > 2 && seg.starts_with('{') && seg.ends_with('}') {
                    Segment::Param(seg[1..seg.len() - 1].to_string())
                } else {
                    Segment::Literal(seg.to_string())
                }
            })
            .collect();
        Self { raw, segments }
    }

    /// The pattern as declared, for logging and metrics labels.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match an incoming path against this pattern.
    ///
    /// Returns the captured parameters on a structural match (empty map for
    /// purely literal patterns), or `None` when the path does not fit.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let actual: Vec<&str> = path.split('/').collect();
        if actual.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, value) in self.segments.iter().zip(actual) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != value {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), value.to_string());
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("/api/users");
        let params = pattern.match_path("/api/users").unwrap();
        assert!(params.is_empty());

        assert!(pattern.match_path("/api/orders").is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = PathPattern::parse("/users/{id}");
        let params = pattern.match_path("/users/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_segment_count_mismatch() {
        let pattern = PathPattern::parse("/users/{id}");
        assert!(pattern.match_path("/users/42/extra").is_none());
        assert!(pattern.match_path("/users").is_none());
    }

    #[test]
    fn test_param_requires_nonempty_segment() {
        let pattern = PathPattern::parse("/users/{id}");
        assert!(pattern.match_path("/users/").is_none());
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        let pattern = PathPattern::parse("/Users/{id}");
        assert!(pattern.match_path("/users/42").is_none());
        assert!(pattern.match_path("/Users/42").is_some());
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::parse("/teams/{team}/members/{member}");
        let params = pattern.match_path("/teams/core/members/7").unwrap();
        assert_eq!(params.get("team").map(String::as_str), Some("core"));
        assert_eq!(params.get("member").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.match_path("/").unwrap().is_empty());
        assert!(pattern.match_path("/x").is_none());
    }

    #[test]
    fn test_empty_braces_are_literal() {
        let pattern = PathPattern::parse("/x/{}");
        assert!(pattern.match_path("/x/{}").unwrap().is_empty());
        assert!(pattern.match_path("/x/y").is_none());
    }
}
