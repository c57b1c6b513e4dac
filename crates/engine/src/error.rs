use nestpath_keyset::KeysetError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Malformed path or selector expression, raised at construction time.
    #[error("parse error: {0}")]
    Parse(String),

    /// A mapping key is absent.
    #[error("key error: {0}")]
    Key(String),

    /// A sequence index is out of range, non-numeric, or a selector was
    /// applied to a universe it cannot slice.
    #[error("index error: {0}")]
    Index(String),

    /// An object field is absent, or a path descends into a leaf value.
    #[error("attribute error: {0}")]
    Attr(String),

    /// A call target is not callable, or a value cannot be represented in
    /// the requested form.
    #[error("type error: {0}")]
    Type(String),
}

impl PathError {
    /// The lookup class: the failures `has_in` answers `false` for and
    /// `get_in_or` replaces with the default.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            PathError::Key(_) | PathError::Index(_) | PathError::Attr(_)
        )
    }
}

impl From<KeysetError> for PathError {
    fn from(err: KeysetError) -> Self {
        match err {
            KeysetError::Parse { .. } => PathError::Parse(err.to_string()),
            KeysetError::Universe(message) => PathError::Index(message),
        }
    }
}
