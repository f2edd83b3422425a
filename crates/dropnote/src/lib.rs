//! # Dropnote
//!
//! Shared-text rooms with short codes, TTL expiry, and live updates.
//!
//! One party creates a room and gets a 6-character code; everyone who
//! knows the code can read and overwrite the room's single text blob,
//! and every open session sees each committed write in near-real-time
//! until the room expires and is purged.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use dropnote::Dropnote;
//!
//! # async fn demo() -> Result<(), dropnote::DropnoteError> {
//! let engine = Dropnote::builder().build();
//!
//! // One side creates a room and shares the code out-of-band.
//! let room = engine.create_room(Duration::from_secs(24 * 3600)).await?;
//! println!("share this code: {}", room.code);
//!
//! // The other side joins with the code (case doesn't matter).
//! let session = engine.open(room.code.as_str()).await?;
//! session.update_content("hello from the other side".into()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Layering
//!
//! ```text
//! dropnote (this crate: facade, unified error)
//!   ├── dropnote-session   per-client state machine
//!   ├── dropnote-notify    per-code change fan-out
//!   ├── dropnote-store     records, storage contract, expiry policy
//!   └── dropnote-code      code format and generation
//! ```

mod error;
mod service;
mod telemetry;

pub use error::DropnoteError;
pub use service::{Dropnote, DropnoteBuilder};
pub use telemetry::init_tracing;

// Re-export the layer types callers actually touch.
pub use dropnote_code::{CodeConfig, CodeError, CodeSource, RoomCode, RoomCodeGenerator};
pub use dropnote_notify::{ChangeNotifier, SubscriptionHandle};
pub use dropnote_session::{RoomSession, SessionError, SessionPhase};
pub use dropnote_store::{
    Clock, MAX_CREATE_ATTEMPTS, ManualClock, Room, RoomStore, StoreError, StoreHandle,
    SystemClock, create_room, is_expired, resolve_live, spawn_store,
};
