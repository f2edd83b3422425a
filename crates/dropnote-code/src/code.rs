//! The room-code format: configuration and the normalized code type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CodeError;

// ---------------------------------------------------------------------------
// CodeConfig
// ---------------------------------------------------------------------------

/// Configuration for the room-code format.
///
/// The defaults are the canonical format: 6 characters drawn from
/// `A-Z0-9`. The alphabet must contain only uppercase letters and
/// digits — codes are normalized to uppercase before validation, so a
/// lowercase alphabet entry would be unreachable.
#[derive(Debug, Clone, Copy)]
pub struct CodeConfig {
    /// Number of characters in a code.
    pub length: usize,

    /// The symbols a code may contain. At least 36 symbols keeps the
    /// collision probability at the reference level.
    pub alphabet: &'static str,
}

impl CodeConfig {
    /// The canonical alphabet: case-insensitive letters plus digits.
    pub const ALPHABET: &'static str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// The canonical code length.
    pub const LENGTH: usize = 6;
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            length: Self::LENGTH,
            alphabet: Self::ALPHABET,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomCode
// ---------------------------------------------------------------------------

/// A validated, uppercase-normalized room code.
///
/// `RoomCode` is a newtype over `String`: two codes that differ only
/// in case are the *same* code, and normalizing at construction means
/// equality, hashing, and store lookups are all case-insensitive for
/// free — no caller ever has to remember to lowercase/uppercase.
///
/// `#[serde(transparent)]` serializes the code as a bare string, so a
/// record snapshot carries `"K7P2QD"`, not `{ "0": "K7P2QD" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Parses and normalizes a user-supplied code against a config.
    ///
    /// Uppercases the input first, then checks length and alphabet
    /// membership.
    ///
    /// # Errors
    /// - [`CodeError::BadLength`] — wrong number of characters
    /// - [`CodeError::BadChar`] — character outside the alphabet
    pub fn parse(raw: &str, config: &CodeConfig) -> Result<Self, CodeError> {
        let normalized = raw.trim().to_uppercase();

        let got = normalized.chars().count();
        if got != config.length {
            return Err(CodeError::BadLength {
                expected: config.length,
                got,
            });
        }

        if let Some(bad) = normalized.chars().find(|c| !config.alphabet.contains(*c)) {
            return Err(CodeError::BadChar(bad));
        }

        Ok(Self(normalized))
    }

    /// Wraps a string that is already normalized and alphabet-valid.
    ///
    /// Only the generator uses this — its output is valid by
    /// construction, so re-validating would be wasted work.
    pub(crate) fn from_generated(code: String) -> Self {
        Self(code)
    }

    /// The code as a string slice (always uppercase).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomCode {
    type Err = CodeError;

    /// Parses against the canonical [`CodeConfig::default`] format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &CodeConfig::default())
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// Tests
// =========================================================================
