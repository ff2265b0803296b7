//! Current location in the remote tree.
//!
//! A [`PathStack`] is an ordered list of directory names below the user's
//! root. It is the single source of truth for "where am I"; the breadcrumb
//! trail and the directory snapshot are derived from it.
//!
//! # Path Convention
//!
//! - Root: empty stack, serialized as `""`
//! - Nested: `["docs", "2024"]`, serialized as `"docs/2024"`
//! - No leading or trailing slashes, never `.` or `..`

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::PathError;

/// Path separator used on the wire.
pub const SEPARATOR: char = '/';

/// Characters escaped inside a single segment.
///
/// Everything but the RFC 3986 unreserved set, so `/`, `?`, `#`, `%`, `&`
/// and `+` inside a name survive a trip through a query parameter.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Check that `segment` can live inside a [`PathStack`].
pub fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment);
    }
    if segment.contains(SEPARATOR) {
        return Err(PathError::ContainsSeparator(segment.to_string()));
    }
    if segment == "." || segment == ".." {
        return Err(PathError::ReservedSegment(segment.to_string()));
    }
    Ok(())
}

/// Percent-encode one segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Inverse of [`encode_segment`].
pub fn decode_segment(encoded: &str) -> Result<String, PathError> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| PathError::InvalidEncoding(encoded.to_string()))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathStack {
    segments: Vec<String>,
}

impl PathStack {
    /// The root location.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a stack from already-split segments, validating each one.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(Into::into)
            .map(|s| validate_segment(&s).map(|_| s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// Parse a serialized path. Empty parts (`a//b`, leading `/`) are skipped.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        Self::from_segments(path.split(SEPARATOR).filter(|s| !s.is_empty()))
    }

    /// Parse the output of [`PathStack::encoded`].
    pub fn parse_encoded(encoded: &str) -> Result<Self, PathError> {
        let segments = encoded
            .split(SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_segments(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Alias of [`is_empty`](Self::is_empty) that reads better at call sites.
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Name of the current directory, `None` at root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Enter a subdirectory. On error the stack is unchanged.
    pub fn push(&mut self, segment: &str) -> Result<(), PathError> {
        validate_segment(segment)?;
        self.segments.push(segment.to_string());
        Ok(())
    }

    /// Leave one level. Popping the root is a no-op.
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// Atomically replace the whole stack. On error the stack is unchanged.
    pub fn replace<I, S>(&mut self, segments: I) -> Result<(), PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Self::from_segments(segments)?;
        Ok(())
    }

    /// Keep only the first `depth` segments. `depth` past the end is a no-op.
    pub fn truncate(&mut self, depth: usize) {
        self.segments.truncate(depth);
    }

    /// Wire form: segments joined by `/`.
    pub fn serialize(&self) -> String {
        self.segments.join("/")
    }

    /// Wire form with every segment percent-encoded on its own.
    pub fn encoded(&self) -> String {
        self.segments
            .iter()
            .map(|s| encode_segment(s))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Full path of `name` below this location.
    ///
    /// `name` may itself be a relative path (`"sub/b.txt"`), but every part
    /// must be a valid segment.
    pub fn child(&self, name: &str) -> Result<PathStack, PathError> {
        let mut full = self.clone();
        for part in name.split(SEPARATOR) {
            full.push(part)?;
        }
        Ok(full)
    }
}

impl fmt::Display for PathStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(segments: &[&str]) -> PathStack {
        PathStack::from_segments(segments.iter().copied()).unwrap()
    }

    #[test]
    fn test_root_serializes_empty() {
        assert_eq!(PathStack::root().serialize(), "");
        assert_eq!(PathStack::root().encoded(), "");
        assert!(PathStack::root().is_root());
    }

    #[test]
    fn test_push_and_serialize() {
        let mut path = PathStack::root();
        path.push("docs").unwrap();
        path.push("2024").unwrap();
        assert_eq!(path.serialize(), "docs/2024");
        assert_eq!(path.name(), Some("2024"));
    }

    #[test]
    fn test_push_rejects_invalid_segments() {
        let mut path = stack(&["docs"]);
        assert_eq!(path.push(""), Err(PathError::EmptySegment));
        assert_eq!(
            path.push("a/b"),
            Err(PathError::ContainsSeparator("a/b".to_string()))
        );
        assert_eq!(
            path.push(".."),
            Err(PathError::ReservedSegment("..".to_string()))
        );
        assert_eq!(path, stack(&["docs"]));
    }

    #[test]
    fn test_pop_at_root_is_noop() {
        let mut path = PathStack::root();
        assert_eq!(path.pop(), None);
        assert_eq!(path.pop(), None);
        assert!(path.is_root());
    }

    #[test]
    fn test_push_pop_round_trip() {
        let original = stack(&["a", "b"]);
        for segment in ["c", "with space", "100%", "?#&"] {
            let mut path = original.clone();
            path.push(segment).unwrap();
            path.pop();
            assert_eq!(path, original, "segment={segment:?}");
        }
    }

    #[test]
    fn test_truncate_matches_prefix() {
        let segments = ["docs", "2024", "q1", "reports"];
        for depth in 0..=segments.len() {
            let mut path = stack(&segments);
            path.truncate(depth);
            assert_eq!(path.serialize(), segments[..depth].join("/"), "depth={depth}");
        }
    }

    #[test]
    fn test_truncate_past_end_is_noop() {
        let mut path = stack(&["a", "b"]);
        path.truncate(5);
        assert_eq!(path, stack(&["a", "b"]));
    }

    #[test]
    fn test_replace_is_atomic() {
        let mut path = stack(&["a"]);
        assert!(path.replace(["x", "", "y"]).is_err());
        assert_eq!(path, stack(&["a"]));

        path.replace(["x", "y"]).unwrap();
        assert_eq!(path.serialize(), "x/y");

        path.replace(Vec::<String>::new()).unwrap();
        assert!(path.is_root());
    }

    #[test]
    fn test_segment_encoding_round_trip() {
        for segment in ["a/b", "what?", "#1", "100%", "a&b=c", "a+b", "ümlaut dir"] {
            let encoded = encode_segment(segment);
            assert!(!encoded.contains('/'), "encoded={encoded:?}");
            assert_eq!(decode_segment(&encoded).unwrap(), segment);
        }
    }

    #[test]
    fn test_encoded_path_round_trip() {
        let path = stack(&["reports?", "50% done", "#tag"]);
        assert_eq!(path.encoded(), "reports%3F/50%25%20done/%23tag");
        assert_eq!(PathStack::parse_encoded(&path.encoded()).unwrap(), path);
    }

    #[test]
    fn test_parse_skips_empty_parts() {
        assert_eq!(PathStack::parse("/docs//2024/").unwrap(), stack(&["docs", "2024"]));
        assert!(PathStack::parse("docs/../etc").is_err());
    }

    #[test]
    fn test_child_resolves_relative_names() {
        let docs = stack(&["docs"]);
        assert_eq!(docs.child("a.txt").unwrap().serialize(), "docs/a.txt");
        assert_eq!(docs.child("sub/a.txt").unwrap().serialize(), "docs/sub/a.txt");
        assert_eq!(PathStack::root().child("a.txt").unwrap().serialize(), "a.txt");
        assert!(docs.child("").is_err());
        assert!(docs.child("../a.txt").is_err());
        assert!(docs.child("sub/").is_err());
        assert_eq!(docs, stack(&["docs"]));
    }
}
