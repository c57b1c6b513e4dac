use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeysetError {
    #[error("parse error in key expression '{expression}': {message}")]
    Parse { expression: String, message: String },

    /// The selector is well-formed but cannot address the kind of universe
    /// it was evaluated against (e.g. a slice applied to string keys).
    #[error("{0}")]
    Universe(String),
}

impl KeysetError {
    pub(crate) fn parse(expression: &str, message: impl Into<String>) -> Self {
        KeysetError::Parse {
            expression: expression.to_string(),
            message: message.into(),
        }
    }
}
