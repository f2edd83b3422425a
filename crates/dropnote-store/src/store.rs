//! The storage contract: what any persistence backend must provide.

use dropnote_code::RoomCode;

use crate::{Room, StoreError};

/// The contract a room persistence backend must meet.
///
/// The built-in [`StoreHandle`](crate::StoreHandle) implements this
/// over an in-memory actor; a real deployment can implement it over
/// any keyed record store that offers a unique-constrained insert
/// with a distinguishable conflict error.
///
/// Every operation must be atomic at the record level. `update` is an
/// unconditional whole-content replace — the store does no version
/// checking on write, so concurrent updates to one room resolve as
/// last-write-wins.
pub trait RoomStore: Send + Sync + 'static {
    /// Atomically stores a new room.
    ///
    /// # Errors
    /// - [`StoreError::Collision`] — a room with this code already
    ///   exists (never overwritten).
    /// - [`StoreError::Unavailable`] — the backend did not answer.
    async fn insert(&self, room: Room) -> Result<Room, StoreError>;

    /// Point lookup by code.
    ///
    /// Returns whatever is stored, expired or not — expiry is the
    /// caller's policy (see [`resolve_live`](crate::resolve_live)).
    ///
    /// # Errors
    /// - [`StoreError::NotFound`]
    /// - [`StoreError::Unavailable`]
    async fn fetch(&self, code: &RoomCode) -> Result<Room, StoreError>;

    /// Atomically replaces a room's content.
    ///
    /// Refreshes `updated_at` and increments `version`, then returns
    /// the post-update record so the caller can publish the exact
    /// committed snapshot.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] — update failures are always
    ///   reported, never swallowed.
    /// - [`StoreError::Unavailable`]
    async fn update(&self, code: &RoomCode, content: String) -> Result<Room, StoreError>;

    /// Deletes a room. Idempotent: deleting a code that is not stored
    /// succeeds.
    ///
    /// # Errors
    /// - [`StoreError::Unavailable`]
    async fn delete(&self, code: &RoomCode) -> Result<(), StoreError>;
}
