//! Room-code format and generation for Dropnote.
//!
//! A room code is the short, human-shareable identifier for a room —
//! and its only access credential. This crate defines:
//!
//! - **Format** ([`RoomCode`], [`CodeConfig`]) — fixed length, drawn
//!   from a case-insensitive alphabet, normalized to uppercase.
//! - **Generation** ([`CodeSource`] trait, [`RoomCodeGenerator`]) —
//!   uniform random draws with no shared mutable state.
//! - **Errors** ([`CodeError`]) — what can go wrong when parsing a
//!   code supplied by a user.
//!
//! # Uniqueness
//!
//! The generator guarantees length and alphabet membership, *not*
//! uniqueness. At 6 characters over a 36-symbol alphabet the birthday
//! bound makes collisions rare but real; the store layer handles them
//! by retrying insertion with a fresh code.

mod code;
mod error;
mod generator;

pub use code::{CodeConfig, RoomCode};
pub use error::CodeError;
pub use generator::{CodeSource, RoomCodeGenerator};
