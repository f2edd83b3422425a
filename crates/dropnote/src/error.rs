//! Unified error type for the Dropnote facade.

use dropnote_code::CodeError;
use dropnote_session::SessionError;
use dropnote_store::StoreError;

/// Top-level error wrapping each layer's error type.
///
/// Callers of the facade deal with this single enum; `#[from]` lets
/// `?` convert layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DropnoteError {
    /// A malformed room code (wrong length, bad character).
    #[error(transparent)]
    Code(#[from] CodeError),

    /// A storage-layer error (collision, not found, unavailable).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session-layer error (not found, expired, update failed).
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_error() {
        let err = CodeError::BadChar('!');
        let top: DropnoteError = err.into();
        assert!(matches!(top, DropnoteError::Code(_)));
        assert!(top.to_string().contains('!'));
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::InvalidTtl;
        let top: DropnoteError = err.into();
        assert!(matches!(top, DropnoteError::Store(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::NotFound("AAAAAA".parse().unwrap());
        let top: DropnoteError = err.into();
        assert!(matches!(top, DropnoteError::Session(_)));
        assert!(top.to_string().contains("AAAAAA"));
    }
}
