//! Error types for the session layer.
//!
//! Callers branch on these to pick the right user-facing path: a
//! not-found room invites "create a new one", an expired room explains
//! itself, a backend failure says "try again". Each variant therefore
//! carries a distinct, human-readable message.

use dropnote_code::RoomCode;
use dropnote_store::StoreError;

use crate::SessionPhase;

/// Errors that can occur during session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The code has no matching room.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// The room existed but its expiry horizon has passed; it has
    /// been purged best-effort along the way.
    #[error("room {0} has expired")]
    Expired(RoomCode),

    /// A content mutation did not commit. The cached content is left
    /// unchanged — it was never optimistically modified.
    #[error("failed to save room content: {0}")]
    UpdateFailed(#[source] StoreError),

    /// The persistence backend was unreachable or misbehaved during
    /// resolution. The session is left in a reportable `Dead` state,
    /// not crashed; retrying is the caller's decision.
    #[error("room backend failure: {0}")]
    Backend(#[source] StoreError),

    /// The operation needs a `Live` session and this one is not.
    #[error("session is not live (currently {0})")]
    NotLive(SessionPhase),
}

impl SessionError {
    /// Maps a resolution failure from the store layer onto the
    /// session taxonomy.
    pub(crate) fn from_resolve(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(code) => Self::NotFound(code),
            StoreError::Expired(code) => Self::Expired(code),
            other => Self::Backend(other),
        }
    }
}
