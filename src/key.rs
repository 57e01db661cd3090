//! Key derivation
//!
//! Maps a vector's base identifier and logical indices to the fixed-size
//! storage keys its slots live under.
//!
//! ## Key Layout
//! - Header key (length record): the base key itself.
//! - Slot key for index `i`: SHA-256(base ‖ i as big-endian u64).
//!
//! Slot keys for distinct indices under one base never collide, and none
//! of them collides with the header key. Derivation is a pure function
//! computed fresh on every access; nothing is cached.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Size of every storage key, in bytes
pub const KEY_SIZE: usize = 32;

// =============================================================================
// SlotKey
// =============================================================================

/// A fixed-size key addressing one slot in the storage medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey([u8; KEY_SIZE]);

impl SlotKey {
    /// Create a slot key from raw bytes
    pub const fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

// =============================================================================
// BaseKey
// =============================================================================

/// The root identifier of one vector instance
///
/// Assigned once at declaration and immutable for the vector's lifetime.
/// All of the vector's slot keys and its header key derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseKey([u8; KEY_SIZE]);

impl BaseKey {
    /// Create a base key from raw bytes
    pub const fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Derive a base key from a human-readable name
    ///
    /// Hashes the name so callers can address vectors by label without
    /// managing raw key bytes themselves.
    pub fn from_name(name: &str) -> Self {
        Self(Sha256::digest(name.as_bytes()).into())
    }

    /// Raw key bytes
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Key of the length record
    ///
    /// The header lives at the base key itself, a reserved location no
    /// element slot can alias.
    pub const fn header_key(&self) -> SlotKey {
        SlotKey(self.0)
    }

    /// Key of the slot holding logical index `index`
    ///
    /// SHA-256 over the base key followed by the big-endian index.
    pub fn slot_key(&self, index: u64) -> SlotKey {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(index.to_be_bytes());
        SlotKey(hasher.finalize().into())
    }
}

impl fmt::Display for BaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
