//! Errors shared by every module of the crate.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter was outside the range an operation accepts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An encoded stream contained something other than `'0'` or `'1'`.
    #[error("invalid digit {found:?} at index {index} of encoded stream")]
    InvalidDigit {
        /// Byte offset of the offending character.
        index: usize,
        /// The character found there.
        found: char,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
