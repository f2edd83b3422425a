//! Per-room change fan-out for Dropnote.
//!
//! The [`ChangeNotifier`] delivers post-update
//! [`Room`](dropnote_store::Room) snapshots to every live subscriber
//! of a room code. It is deliberately weak:
//!
//! - best-effort, at-most-once per event per subscriber
//! - no replay for late subscribers, no durability
//! - per-subscriber ordering follows publish order for one code;
//!   nothing is promised across codes
//! - a dead or slow subscriber never affects the publisher or the
//!   other subscribers (unbounded channels, fire-and-forget sends)
//!
//! This mirrors what a real push channel (server-sent events, a
//! database change feed) gives you, so the session layer built on top
//! never assumes more than production would provide.

mod notifier;

pub use notifier::{ChangeNotifier, SubscriptionHandle};
