//! The `Room` record — the sole persisted entity.

use std::time::{Duration, SystemTime};

use dropnote_code::RoomCode;
use serde::{Deserialize, Serialize};

/// A shared text room: one code, one content blob, one expiry horizon.
///
/// Nobody owns a room — it is a shared mailbox addressed by code. The
/// store holds the authoritative copy; sessions only ever cache
/// snapshots of it.
///
/// Timestamps are `SystemTime` (unix-epoch anchored, so UTC by
/// construction) compared at whatever resolution the platform clock
/// gives, which is at least seconds everywhere we care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// The unique, uppercase-normalized lookup key — and the room's
    /// only access credential.
    pub code: RoomCode,

    /// The shared payload. Opaque text; the store never validates or
    /// interprets it. Empty at creation.
    pub content: String,

    /// Set once at creation, never mutated.
    pub created_at: SystemTime,

    /// `created_at + ttl`, set once at creation, never mutated.
    /// A room whose `expires_at` has passed is logically dead.
    pub expires_at: SystemTime,

    /// Refreshed by the store on every content update.
    pub updated_at: SystemTime,

    /// Monotonic update counter: 0 at insert, +1 per committed
    /// update. Subscribers use it to discard reordered stale
    /// deliveries — the store never compares versions on write
    /// (writes are last-write-wins).
    pub version: u64,
}

impl Room {
    /// Builds a fresh, empty room record stamped at `now`.
    ///
    /// The caller validates `ttl > 0` first (see
    /// [`create_room`](crate::create_room)); this constructor assumes
    /// it, which keeps `expires_at > created_at` true for every room
    /// that ever reaches a store.
    pub fn new(code: RoomCode, now: SystemTime, ttl: Duration) -> Self {
        Self {
            code,
            content: String::new(),
            created_at: now,
            expires_at: now + ttl,
            updated_at: now,
            version: 0,
        }
    }
}
