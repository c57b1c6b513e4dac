//! The expression tree for key-set selector expressions.

use crate::error::KeysetError;
use crate::glob::GlobPattern;
use crate::slice::SliceExpr;

/// A parsed key-selection expression, built once per distinct segment string
/// and evaluated against the ordered key/index universe of a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Matches every key or index in the universe (`*` or `:`).
    All,
    /// A bare token: a shell-style glob over string keys, or an exact
    /// (possibly negative) index over sequences.
    Token(TokenAtom),
    /// A numeric slice over sequence indices (`1:7`, `::2`, `-1::-1`).
    Slice(SliceExpr),
    /// Complement against the universe passed at evaluation time.
    Not(Box<Selector>),
    /// Intersection of all terms.
    And(Vec<Selector>),
    /// Union of all terms.
    Or(Vec<Selector>),
}

/// A bare atom. The raw token doubles as a glob for name universes and, when
/// it parses as an integer, as an exact index for sequence universes.
#[derive(Debug, Clone)]
pub struct TokenAtom {
    raw: String,
    glob: GlobPattern,
    index: Option<i64>,
}

impl TokenAtom {
    pub(crate) fn new(raw: &str) -> Result<Self, KeysetError> {
        Ok(Self {
            raw: raw.to_string(),
            glob: GlobPattern::new(raw)?,
            index: raw.parse().ok(),
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub(crate) fn matches_name(&self, name: &str) -> bool {
        self.glob.matches(name)
    }

    pub(crate) fn index(&self) -> Option<i64> {
        self.index
    }
}

impl PartialEq for TokenAtom {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}
