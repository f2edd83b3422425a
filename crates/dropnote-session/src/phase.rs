//! The session lifecycle state.

use std::fmt;

/// Where a [`RoomSession`](crate::RoomSession) is in its lifecycle.
///
/// - **Idle**: no code bound; nothing cached, nothing subscribed.
/// - **Resolving**: a fetch is in flight for the bound code.
/// - **Live**: the room resolved; the cache tracks change deliveries
///   and content mutations are accepted.
/// - **Dead**: the code resolved to nothing (not found, expired, or
///   the backend failed). Terminal for this code — only binding a new
///   code or deactivating leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Resolving,
    Live,
    Dead,
}

impl SessionPhase {
    /// Returns `true` if content mutations are currently accepted.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Resolving => write!(f, "Resolving"),
            Self::Live => write!(f, "Live"),
            Self::Dead => write!(f, "Dead"),
        }
    }
}
