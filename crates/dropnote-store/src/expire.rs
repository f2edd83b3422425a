//! Expiration policy: lazy check-then-evict.
//!
//! There is no background sweep. A room past its horizon sits in the
//! store until somebody fetches it; that first fetch purges it and
//! reports `Expired`. Abandoned rooms persisting until an external
//! retention sweep is the accepted cost of not running a timer task.

use std::time::SystemTime;

use dropnote_code::RoomCode;

use crate::{Clock, Room, RoomStore, StoreError};

/// Whether a room is logically dead at `now`.
///
/// The boundary is inclusive: a fetch at exactly `expires_at` sees a
/// dead room.
pub fn is_expired(room: &Room, now: SystemTime) -> bool {
    now >= room.expires_at
}

/// Fetches a room and applies the expiration policy.
///
/// Live rooms are returned as-is. Expired rooms are purged
/// best-effort — a failed delete is logged and does not change the
/// outcome, so the caller always learns the truth even when cleanup
/// lags.
///
/// # Errors
/// - [`StoreError::NotFound`] — no such room.
/// - [`StoreError::Expired`] — the room was dead; it has (probably)
///   been purged, so the next fetch of this code reports `NotFound`.
/// - Any backend error from the fetch itself.
pub async fn resolve_live<S: RoomStore>(
    store: &S,
    clock: &dyn Clock,
    code: &RoomCode,
) -> Result<Room, StoreError> {
    let room = store.fetch(code).await?;

    if is_expired(&room, clock.now()) {
        match store.delete(code).await {
            Ok(()) => tracing::info!(%code, "expired room purged"),
            Err(err) => tracing::warn!(%code, %err, "failed to purge expired room"),
        }
        return Err(StoreError::Expired(code.clone()));
    }

    Ok(room)
}

// =========================================================================
// Tests
// =========================================================================
