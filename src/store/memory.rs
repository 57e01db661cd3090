//! In-memory backend
//!
//! HashMap-based slot store with operation counters.
//!
//! Every slot access in this domain is metered I/O, so the counters are
//! part of the contract surface: tests assert operation-count bounds
//! against them, benchmarks read them for context.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use parking_lot::RwLock;

use crate::codec::Word;
use crate::error::Result;
use crate::key::SlotKey;

use super::StorageBackend;

/// In-memory slot store
///
/// ## Concurrency:
/// - `words` / `payloads`: Protected by RwLock (many concurrent readers)
/// - Counters: Atomic (lock-free)
/// - All methods use `&self`
#[derive(Default)]
pub struct MemoryStore {
    /// Word slots
    words: RwLock<HashMap<SlotKey, Word>>,

    /// Out-of-line payloads, content-addressed
    payloads: RwLock<HashMap<SlotKey, Bytes>>,

    /// Number of word reads served
    reads: AtomicU64,

    /// Number of word writes applied
    writes: AtomicU64,

    /// Number of payload reads served
    payload_reads: AtomicU64,

    /// Number of payload writes applied
    payload_writes: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors (for testing and benchmarking)
    // =========================================================================

    /// Word reads served so far
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Word writes applied so far
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Payload reads served so far
    pub fn payload_read_count(&self) -> u64 {
        self.payload_reads.load(Ordering::Relaxed)
    }

    /// Payload writes applied so far
    pub fn payload_write_count(&self) -> u64 {
        self.payload_writes.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero
    pub fn reset_counters(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
        self.payload_reads.store(0, Ordering::Relaxed);
        self.payload_writes.store(0, Ordering::Relaxed);
    }

    /// Number of physically present words (stale slots included)
    pub fn word_count(&self) -> usize {
        self.words.read().len()
    }

    /// Number of stored payloads
    pub fn payload_count(&self) -> usize {
        self.payloads.read().len()
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: SlotKey) -> Result<Option<Word>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.words.read().get(&key).copied())
    }

    fn write(&self, key: SlotKey, word: Word) -> Result<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.words.write().insert(key, word);
        Ok(())
    }

    fn read_bytes(&self, key: SlotKey) -> Result<Option<Bytes>> {
        self.payload_reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.payloads.read().get(&key).cloned())
    }

    fn write_bytes(&self, key: SlotKey, payload: Bytes) -> Result<()> {
        self.payload_writes.fetch_add(1, Ordering::Relaxed);
        self.payloads.write().insert(key, payload);
        Ok(())
    }
}
