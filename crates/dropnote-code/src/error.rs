//! Error types for the code layer.

/// Errors that can occur when parsing a user-supplied room code.
///
/// Generated codes never produce these — they are valid by
/// construction. Parsing matters at the "join room" boundary, where
/// the code arrives as arbitrary text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodeError {
    /// The code has the wrong number of characters.
    #[error("room code must be {expected} characters, got {got}")]
    BadLength { expected: usize, got: usize },

    /// The code contains a character outside the configured alphabet.
    #[error("room code contains invalid character {0:?}")]
    BadChar(char),
}
