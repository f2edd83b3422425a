//! Per-client room sessions for Dropnote.
//!
//! A [`RoomSession`] is the unit of one client's interest in one room
//! code. It composes the other layers:
//!
//! 1. **Resolve** — fetch the code through the expiration policy
//!    (store crate); expired rooms are purged on the way.
//! 2. **Subscribe** — register with the change notifier and pump
//!    delivered snapshots into a locally cached copy.
//! 3. **Mutate** — push whole-content replacements through the store
//!    and publish the committed record; the local cache is only ever
//!    refreshed by the subscription echo, never optimistically.
//! 4. **Tear down** — unsubscribe on every exit path, so
//!    subscriptions cannot leak.
//!
//! # State machine
//!
//! ```text
//! Idle ──(activate)──→ Resolving ──(ok)──→ Live
//!                          │                 │
//!                     (not found /      (deactivate)
//!                      expired /             │
//!                      backend)              ▼
//!                          └────→ Dead     Idle
//! ```
//!
//! `Dead` is terminal *for that code*: the session can be reactivated
//! with a different code, which starts the machine over.

mod error;
mod phase;
mod session;

pub use error::SessionError;
pub use phase::SessionPhase;
pub use session::RoomSession;
