//! Room creation: code generation + insert with bounded retry.

use std::time::Duration;

use dropnote_code::CodeSource;

use crate::{Clock, Room, RoomStore, StoreError};

/// How many candidate codes creation will try before giving up.
///
/// Collisions are birthday-rare at the canonical 36^6 code space, so
/// hitting this bound means something is structurally wrong — far
/// better to fail loudly than to retry forever.
pub const MAX_CREATE_ATTEMPTS: usize = 10;

/// Creates a fresh, empty room with a newly drawn code.
///
/// Draws a candidate code and attempts an atomic insert; on a
/// [`StoreError::Collision`] it draws again, up to
/// [`MAX_CREATE_ATTEMPTS`] times. Any other store error aborts
/// immediately — only collisions are recoverable here.
///
/// # Errors
/// - [`StoreError::InvalidTtl`] — `ttl` is zero, which would make the
///   room dead on arrival.
/// - [`StoreError::CodeSpaceExhausted`] — every candidate collided.
/// - Any error the store itself reports.
pub async fn create_room<S: RoomStore>(
    store: &S,
    codes: &dyn CodeSource,
    clock: &dyn Clock,
    ttl: Duration,
) -> Result<Room, StoreError> {
    if ttl.is_zero() {
        return Err(StoreError::InvalidTtl);
    }

    let now = clock.now();

    for attempt in 1..=MAX_CREATE_ATTEMPTS {
        let code = codes.next_code();
        match store.insert(Room::new(code, now, ttl)).await {
            Ok(room) => {
                tracing::info!(code = %room.code, ttl_secs = ttl.as_secs(), "room created");
                return Ok(room);
            }
            Err(StoreError::Collision(code)) => {
                tracing::debug!(%code, attempt, "room code collided, drawing again");
            }
            Err(other) => return Err(other),
        }
    }

    tracing::warn!(
        attempts = MAX_CREATE_ATTEMPTS,
        "room creation exhausted its code draws"
    );
    Err(StoreError::CodeSpaceExhausted(MAX_CREATE_ATTEMPTS))
}

// =========================================================================
// Tests
// =========================================================================
