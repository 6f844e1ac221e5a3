//! Error types for the textual transcoder.

use thiserror::Error;

/// Errors from parsing the line-oriented representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxRepError {
    /// A line is not of the form `path: value`.
    #[error("malformed line {0}: expected `path: value`")]
    MalformedLine(usize),

    /// The same path appears twice.
    #[error("duplicate path `{0}`")]
    DuplicatePath(String),

    /// A path the grammar requires is absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A declared `.len` does not match the indexed entries present.
    #[error("`{path}.len` declares {declared} entries but entry {actual} is missing or extra")]
    LengthMismatch {
        path: String,
        declared: usize,
        actual: usize,
    },

    /// A `.type` names a variant the grammar does not know.
    #[error("unknown variant `{name}` at `{path}`")]
    UnknownVariant { path: String, name: String },

    /// A leaf value does not parse as its expected type.
    #[error("invalid value at `{path}`: {reason}")]
    InvalidValue { path: String, reason: String },
}

impl TxRepError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TxRepError>;
