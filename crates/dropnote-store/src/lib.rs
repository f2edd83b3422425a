//! Room storage for Dropnote.
//!
//! This crate owns everything about rooms *at rest*:
//!
//! - [`Room`] — the sole persisted record.
//! - [`RoomStore`] — the contract any persistence backend must meet
//!   (unique-constrained insert, point lookup, whole-record update,
//!   idempotent delete).
//! - [`spawn_store`] / [`StoreHandle`] — the built-in in-memory
//!   backend, an isolated Tokio task that owns the map.
//! - [`create_room`] — code generation + insert with bounded
//!   collision retry.
//! - [`is_expired`] / [`resolve_live`] — the lazy expiration policy:
//!   expired rooms are purged by the first fetch that observes them,
//!   never by a background sweep.
//! - [`Clock`] — injectable time source, so expiry is testable
//!   without sleeping.
//!
//! # Consistency contract
//!
//! The store is the sole source of truth for a room. Updates are
//! atomic whole-content replaces with last-write-wins semantics; the
//! record's `version` counter increments on every commit so higher
//! layers can recognize stale snapshots.

#![allow(async_fn_in_trait)]

mod clock;
mod create;
mod error;
mod expire;
mod memory;
mod room;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use create::{MAX_CREATE_ATTEMPTS, create_room};
pub use error::StoreError;
pub use expire::{is_expired, resolve_live};
pub use memory::{StoreHandle, spawn_store};
pub use room::Room;
pub use store::RoomStore;
