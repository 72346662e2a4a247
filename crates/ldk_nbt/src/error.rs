use thiserror::Error;

use crate::TagType;

/// Errors raised when a tag tree is accessed or mutated with the wrong type.
#[derive(Clone, PartialEq, Eq, Error, Debug)]
#[non_exhaustive]
pub enum TagError {
    #[error("no tag named \"{key}\"")]
    Missing { key: String },
    #[error("tag \"{key}\" is a {found}, expected a {expected}")]
    TypeMismatch {
        key: String,
        expected: TagType,
        found: TagType,
    },
    #[error("cannot put a {found} into a list of {expected}")]
    ListTypeMismatch { expected: TagType, found: TagType },
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T, E = TagError> = std::result::Result<T, E>;
