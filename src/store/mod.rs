//! Storage Module
//!
//! The slot-store boundary the vector runs against.
//!
//! ## Responsibilities
//! - Keyed reads and writes of fixed-size words (the two primitives the
//!   vector core needs)
//! - Opaque read/write-by-reference facility for out-of-line payloads
//! - Concrete backends: in-memory (tests, benchmarks) and file-backed
//!
//! The vector never references ambient global state; a backend handle is
//! injected at construction. Blanket impls for `&S` and `Arc<S>` let one
//! store serve any number of vectors.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use bytes::Bytes;

use crate::codec::Word;
use crate::error::Result;
use crate::key::SlotKey;

// =============================================================================
// StorageBackend
// =============================================================================

/// Keyed slot storage
///
/// The medium is assumed reliable at this level: a successful `write`
/// is observable by later `read`s, and absence is a meaningful answer,
/// not a fault. Backends that can genuinely fail (file I/O) surface
/// errors through the `Result`.
pub trait StorageBackend {
    /// Read the word stored under `key`, if any
    fn read(&self, key: SlotKey) -> Result<Option<Word>>;

    /// Store `word` under `key`, creating or overwriting
    fn write(&self, key: SlotKey, word: Word) -> Result<()>;

    /// Read an out-of-line payload stored under `key`, if any
    fn read_bytes(&self, key: SlotKey) -> Result<Option<Bytes>>;

    /// Store an out-of-line payload under `key`
    fn write_bytes(&self, key: SlotKey, payload: Bytes) -> Result<()>;
}

// =============================================================================
// Blanket Implementations
// =============================================================================

impl<S: StorageBackend + ?Sized> StorageBackend for &S {
    fn read(&self, key: SlotKey) -> Result<Option<Word>> {
        (**self).read(key)
    }

    fn write(&self, key: SlotKey, word: Word) -> Result<()> {
        (**self).write(key, word)
    }

    fn read_bytes(&self, key: SlotKey) -> Result<Option<Bytes>> {
        (**self).read_bytes(key)
    }

    fn write_bytes(&self, key: SlotKey, payload: Bytes) -> Result<()> {
        (**self).write_bytes(key, payload)
    }
}

impl<S: StorageBackend + ?Sized> StorageBackend for Arc<S> {
    fn read(&self, key: SlotKey) -> Result<Option<Word>> {
        (**self).read(key)
    }

    fn write(&self, key: SlotKey, word: Word) -> Result<()> {
        (**self).write(key, word)
    }

    fn read_bytes(&self, key: SlotKey) -> Result<Option<Bytes>> {
        (**self).read_bytes(key)
    }

    fn write_bytes(&self, key: SlotKey, payload: Bytes) -> Result<()> {
        (**self).write_bytes(key, payload)
    }
}
