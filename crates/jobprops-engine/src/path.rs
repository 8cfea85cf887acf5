//! Property paths for addressing within job property trees
//!
//! Provides [`PropertyPath`], a slash-delimited path such as
//! `route_registrar/routes/name=cloudcache/port`, and [`Segment`], the
//! classification of a single path segment.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::EngineError;

/// Slash-delimited path into a property tree
///
/// There is no escaping: keys containing `/` cannot be addressed, and a
/// segment containing exactly one `=` is always read as a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<String>,
}

impl PropertyPath {
    /// Original path text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Path segments, root to leaf
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments (always at least one)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; parsing rejects empty paths
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the terminal segment and the segments leading to it
    #[must_use]
    pub fn split_last(&self) -> (&str, &[String]) {
        match self.segments.split_last() {
            Some((last, parents)) => (last.as_str(), parents),
            None => ("", &[]),
        }
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PropertyPath {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EngineError::EmptyPath);
        }
        Ok(Self {
            raw: s.to_string(),
            segments: s.split('/').map(str::to_string).collect(),
        })
    }
}

/// Classification of one path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `key=value`: select the first sequence element whose `key` equals `value`
    Query { key: &'a str, value: &'a str },
    /// Decimal digits only: 0-based index into a sequence terminal
    Index(&'a str),
    /// Anything else: mapping key
    Key(&'a str),
}

impl<'a> Segment<'a> {
    /// Classify a raw segment
    #[must_use]
    pub fn classify(segment: &'a str) -> Self {
        let mut parts = segment.split('=');
        if let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) {
            return Self::Query { key, value };
        }
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Index(segment);
        }
        Self::Key(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_slash() {
        let path: PropertyPath = "gemfire/tls/enabled".parse().unwrap();
        assert_eq!(path.segments(), &["gemfire", "tls", "enabled"]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "gemfire/tls/enabled");
    }

    #[test]
    fn parse_empty_fails() {
        assert_eq!("".parse::<PropertyPath>(), Err(EngineError::EmptyPath));
    }

    #[test]
    fn parse_keeps_empty_segments() {
        let path: PropertyPath = "a//b".parse().unwrap();
        assert_eq!(path.segments(), &["a", "", "b"]);
    }

    #[test]
    fn split_last_single_segment() {
        let path: PropertyPath = "port".parse().unwrap();
        let (last, parents) = path.split_last();
        assert_eq!(last, "port");
        assert!(parents.is_empty());
    }

    #[test]
    fn split_last_nested() {
        let path: PropertyPath = "a/name=x/port".parse().unwrap();
        let (last, parents) = path.split_last();
        assert_eq!(last, "port");
        assert_eq!(parents, &["a", "name=x"]);
    }

    #[test]
    fn classify_query() {
        assert_eq!(
            Segment::classify("name=cloudcache"),
            Segment::Query {
                key: "name",
                value: "cloudcache"
            }
        );
        assert_eq!(
            Segment::classify("=x"),
            Segment::Query { key: "", value: "x" }
        );
    }

    #[test]
    fn classify_double_equals_is_key() {
        assert_eq!(Segment::classify("a=b=c"), Segment::Key("a=b=c"));
    }

    #[test]
    fn classify_index_and_key() {
        assert_eq!(Segment::classify("12"), Segment::Index("12"));
        assert_eq!(Segment::classify("1a"), Segment::Key("1a"));
        assert_eq!(Segment::classify("-1"), Segment::Key("-1"));
        assert_eq!(Segment::classify(""), Segment::Key(""));
    }
}
