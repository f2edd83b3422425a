//! Error types for the store layer.

use dropnote_code::RoomCode;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A room with this code already exists. Insert never overwrites;
    /// the creation loop recovers by drawing a fresh code.
    #[error("room code {0} already exists")]
    Collision(RoomCode),

    /// No room with this code is stored.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// The room's expiry horizon has passed. Raised by
    /// [`resolve_live`](crate::resolve_live) after the best-effort
    /// purge; plain `fetch` reports what is stored.
    #[error("room {0} has expired")]
    Expired(RoomCode),

    /// The requested TTL would not put `expires_at` after
    /// `created_at`.
    #[error("room TTL must be greater than zero")]
    InvalidTtl,

    /// Creation drew the maximum number of candidate codes and every
    /// one collided. Practically this means the code space is badly
    /// oversubscribed (or the code source is broken).
    #[error("could not find a free room code after {0} attempts")]
    CodeSpaceExhausted(usize),

    /// The backend did not answer (channel closed, connection gone).
    #[error("room store is unavailable")]
    Unavailable,
}
