//! URL pattern matching.
//!
//! A pattern is a host plus a path of literal and capture segments:
//!
//! ```text
//! host:  app.example.com
//! path:  /foo/:id/baz/:id2
//!         │    │   │    └── Capture("id2")
//!         │    │   └─────── Literal("baz")
//!         │    └─────────── Capture("id")
//!         └──────────────── Literal("foo")
//! ```
//!
//! Matching rules:
//! - Host must be equal (case-sensitive, no normalization)
//! - Empty segments are ignored, so `/a//b/` and `a/b` are the same path
//! - Segment counts must be equal; there are no wildcards or optional segments
//! - A repeated capture name keeps the last bound value

use herald_config::DEFAULT_CAPTURE_MARKER;

use super::Fragments;

/// One segment of a compiled pattern path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Must equal the candidate segment exactly
    Literal(String),
    /// Binds the candidate segment under this name
    Capture(String),
}

/// A compiled host + path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    host: String,
    segments: Vec<PatternSegment>,
}

impl UrlPattern {
    /// Compile a pattern using the default `:` capture marker.
    pub fn parse(host: impl Into<String>, path: &str) -> Self {
        Self::parse_with_marker(host, path, DEFAULT_CAPTURE_MARKER)
    }

    /// Compile a pattern with a custom capture marker.
    pub fn parse_with_marker(host: impl Into<String>, path: &str, marker: char) -> Self {
        let segments = path_segments(path)
            .map(|segment| match segment.strip_prefix(marker) {
                Some(name) => PatternSegment::Capture(name.to_string()),
                None => PatternSegment::Literal(segment.to_string()),
            })
            .collect();

        Self {
            host: host.into(),
            segments,
        }
    }

    /// Host the candidate must equal.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Compiled path segments.
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Capture names in path order, repeats included.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PatternSegment::Capture(name) => Some(name.as_str()),
            PatternSegment::Literal(_) => None,
        })
    }

    /// Capture names that appear more than once.
    pub fn duplicate_captures(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let mut duplicates = Vec::new();
        for name in self.capture_names() {
            if seen.contains(&name) {
                if !duplicates.contains(&name) {
                    duplicates.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        duplicates
    }

    /// Whether the host is in the form `http`/`https` URLs report.
    ///
    /// Special-scheme hosts come out of [`url::Url`] lowercased and punycoded,
    /// so a host with ASCII uppercase or non-ASCII characters only matches
    /// custom-scheme URLs.
    pub fn host_is_normalized(&self) -> bool {
        self.host
            .chars()
            .all(|c| c.is_ascii() && !c.is_ascii_uppercase())
    }

    /// Match a candidate host and path, returning captured fragments.
    pub fn matches(&self, host: &str, path: &str) -> Option<Fragments> {
        if host != self.host {
            return None;
        }

        let parts: Vec<&str> = path_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut fragments = Fragments::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                PatternSegment::Capture(name) => {
                    fragments.insert(name.clone(), part.to_string());
                }
                PatternSegment::Literal(literal) if literal == part => {}
                PatternSegment::Literal(_) => return None,
            }
        }

        Some(fragments)
    }
}

/// Split a path on `/`, skipping empty segments.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Match a candidate against an uncompiled pattern.
///
/// Convenience for one-off checks; the registry compiles patterns once at
/// registration instead.
pub fn match_url(
    candidate_host: &str,
    candidate_path: &str,
    pattern_host: &str,
    pattern_path: &str,
) -> Option<Fragments> {
    UrlPattern::parse(pattern_host, pattern_path).matches(candidate_host, candidate_path)
}
