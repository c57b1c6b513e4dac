//! Exact and wildcard path values.
//!
//! Both variants are immutable sequences of segment strings split on a
//! separator (default `.`). [`Path`] resolves every segment as one exact
//! key, index or field; [`WildPath`] additionally parses segments containing
//! selector metacharacters into key-set expressions at construction time, so
//! malformed selectors fail before any structure is touched.

use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;
use std::sync::Arc;

use itertools::Itertools;
use nestpath_keyset::{Selector, SelectorCache, is_wild, shared};

use crate::error::PathError;

/// Default segment separator.
pub const SEPARATOR: char = '.';

/// An exact path: every segment names a single key, index or field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
    sep: char,
}

impl Path {
    /// Parses a `.`-delimited path string. The empty string is the empty
    /// path, which resolves to the root itself.
    pub fn parse(path: &str) -> Self {
        Self::parse_sep(path, SEPARATOR)
    }

    pub fn parse_sep(path: &str, sep: char) -> Self {
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split(sep).map(str::to_string).collect()
        };
        Self { segments, sep }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            sep: SEPARATOR,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// A sub-path over `range`, with the same separator.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let (start, end) = clamp_range(&range, self.segments.len());
        Self {
            segments: self.segments[start..end].to_vec(),
            sep: self.sep,
        }
    }

    /// Concatenation; the left-hand separator wins.
    pub fn concat(&self, other: &Path) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self {
            segments,
            sep: self.sep,
        }
    }

    /// This path extended by one segment.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self {
            segments,
            sep: self.sep,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join(&self.sep.to_string()))
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// One parsed wildcard-path segment.
#[derive(Debug, Clone)]
pub(crate) enum Segment {
    Exact(String),
    Wild {
        raw: String,
        selector: Arc<Selector>,
    },
}

impl Segment {
    pub(crate) fn raw(&self) -> &str {
        match self {
            Segment::Exact(raw) => raw,
            Segment::Wild { raw, .. } => raw,
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Segment::Exact(a), Segment::Exact(b)) => a == b,
            (Segment::Wild { raw: a, .. }, Segment::Wild { raw: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// A path whose segments may be key-set selector expressions, resolving to
/// zero or more locations.
#[derive(Debug, Clone, PartialEq)]
pub struct WildPath {
    segments: Vec<Segment>,
    sep: char,
}

impl WildPath {
    /// Parses against the process-wide selector cache.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        Self::parse_full(path, SEPARATOR, shared())
    }

    pub fn parse_sep(path: &str, sep: char) -> Result<Self, PathError> {
        Self::parse_full(path, sep, shared())
    }

    /// Parses with an explicit selector cache; isolated caches keep tests
    /// independent of process-wide state.
    pub fn parse_with(path: &str, cache: &SelectorCache) -> Result<Self, PathError> {
        Self::parse_full(path, SEPARATOR, cache)
    }

    fn parse_full(path: &str, sep: char, cache: &SelectorCache) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        if !path.is_empty() {
            for raw in path.split(sep) {
                segments.push(Self::classify(raw, cache)?);
            }
        }
        let wild = segments
            .iter()
            .filter(|s| matches!(s, Segment::Wild { .. }))
            .count();
        log::trace!("parsed wild path '{}' with {} selector segment(s)", path, wild);
        Ok(Self { segments, sep })
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cache = shared();
        let segments = segments
            .into_iter()
            .map(|s| Self::classify(&s.into(), cache))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            segments,
            sep: SEPARATOR,
        })
    }

    fn classify(raw: &str, cache: &SelectorCache) -> Result<Segment, PathError> {
        if is_wild(raw) {
            Ok(Segment::Wild {
                raw: raw.to_string(),
                selector: cache.get_or_parse(raw)?,
            })
        } else {
            Ok(Segment::Exact(raw.to_string()))
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(Segment::raw)
    }

    /// A sub-path over `range`, with the same separator.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let (start, end) = clamp_range(&range, self.segments.len());
        Self {
            segments: self.segments[start..end].to_vec(),
            sep: self.sep,
        }
    }

    /// Concatenation; the left-hand separator wins.
    pub fn concat(&self, other: &WildPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self {
            segments,
            sep: self.sep,
        }
    }

    pub(crate) fn parts(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for WildPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.segments
                .iter()
                .map(Segment::raw)
                .join(&self.sep.to_string())
        )
    }
}

impl FromStr for WildPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn clamp_range<R: RangeBounds<usize>>(range: &R, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&i) => i,
        Bound::Excluded(&i) => i + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&i) => i + 1,
        Bound::Excluded(&i) => i,
        Bound::Unbounded => len,
    };
    let end = end.min(len);
    (start.min(end), end)
}
