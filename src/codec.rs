//! Element codec
//!
//! Converts element values to and from the fixed-size words stored in
//! slots. Small fixed-size types pack directly into the word; variable
//! size payloads (text, raw bytes) store a hash reference in the word
//! and the payload bytes out-of-line, content-addressed by that
//! reference.
//!
//! The vector core only moves opaque words between slots; it encodes
//! and decodes through [`SlotElement`] at the points where element
//! values enter or leave the container.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, SlotVecError};
use crate::key::SlotKey;
use crate::store::StorageBackend;

/// Size of every slot word, in bytes
///
/// Wide enough to hold a SHA-256 reference inline.
pub const WORD_SIZE: usize = 32;

// =============================================================================
// Word
// =============================================================================

/// One fixed-size storage word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word([u8; WORD_SIZE]);

impl Word {
    /// The all-zero word
    pub const ZERO: Self = Self([0; WORD_SIZE]);

    /// Create a word from raw bytes
    pub const fn new(bytes: [u8; WORD_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw word bytes
    pub const fn as_bytes(&self) -> &[u8; WORD_SIZE] {
        &self.0
    }

    /// Pack a u64 into the low bytes (little-endian, rest zero)
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; WORD_SIZE];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self(bytes)
    }

    /// Read a u64 from the low bytes (little-endian)
    pub fn to_u64(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[..8]);
        u64::from_le_bytes(buf)
    }

    /// Key an out-of-line payload is stored under
    ///
    /// Payloads are content-addressed: the reference hash held in the
    /// word is itself the key into the byte-payload facility.
    pub const fn payload_key(&self) -> SlotKey {
        SlotKey::new(self.0)
    }
}

// =============================================================================
// SlotElement
// =============================================================================

/// Capability to store a value as one slot word
///
/// `encode` may write payload bytes through the backend (out-of-line
/// elements); `decode` may read them back. Inline elements touch the
/// word only.
pub trait SlotElement: Sized {
    /// Encode the value into a word, writing any out-of-line payload
    fn encode<S: StorageBackend>(&self, store: &S) -> Result<Word>;

    /// Decode a value from a word, reading any out-of-line payload
    fn decode<S: StorageBackend>(store: &S, word: Word) -> Result<Self>;
}

// =============================================================================
// Inline Implementations
// =============================================================================

impl SlotElement for u64 {
    fn encode<S: StorageBackend>(&self, _store: &S) -> Result<Word> {
        Ok(Word::from_u64(*self))
    }

    fn decode<S: StorageBackend>(_store: &S, word: Word) -> Result<Self> {
        Ok(word.to_u64())
    }
}

impl SlotElement for Word {
    fn encode<S: StorageBackend>(&self, _store: &S) -> Result<Word> {
        Ok(*self)
    }

    fn decode<S: StorageBackend>(_store: &S, word: Word) -> Result<Self> {
        Ok(word)
    }
}

// =============================================================================
// Out-of-line Implementations
// =============================================================================

impl SlotElement for Bytes {
    /// Store the payload content-addressed; the word holds its hash
    fn encode<S: StorageBackend>(&self, store: &S) -> Result<Word> {
        let reference = Word::new(Sha256::digest(self).into());
        store.write_bytes(reference.payload_key(), self.clone())?;
        Ok(reference)
    }

    fn decode<S: StorageBackend>(store: &S, word: Word) -> Result<Self> {
        store.read_bytes(word.payload_key())?.ok_or_else(|| {
            SlotVecError::Corruption(format!(
                "out-of-line payload missing for reference {}",
                word.payload_key()
            ))
        })
    }
}

impl SlotElement for String {
    fn encode<S: StorageBackend>(&self, store: &S) -> Result<Word> {
        Bytes::copy_from_slice(self.as_bytes()).encode(store)
    }

    fn decode<S: StorageBackend>(store: &S, word: Word) -> Result<Self> {
        let payload = Bytes::decode(store, word)?;
        String::from_utf8(payload.to_vec()).map_err(|e| {
            SlotVecError::Corruption(format!("payload is not valid UTF-8: {}", e))
        })
    }
}
