//! File-backed backend
//!
//! Persists the whole slot image to a single data file.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (10 bytes)                                       │
//! │   Magic: "SVEC" (4) | Version: u16 (2) | CRC32: u32 (4) │
//! ├─────────────────────────────────────────────────────────┤
//! │ Body (variable)                                         │
//! │   bincode image: word slots + out-of-line payloads      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The CRC covers the body; a mismatch on open is treated as corruption
//! and the store refuses to load. How often the image is rewritten is
//! governed by the configured [`SyncStrategy`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bytes::Bytes;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::codec::Word;
use crate::config::{Config, SyncStrategy};
use crate::error::{Result, SlotVecError};
use crate::key::SlotKey;

use super::StorageBackend;

// =============================================================================
// Shared Constants
// =============================================================================

/// Magic bytes identifying a slotvec data file
pub(crate) const MAGIC: &[u8; 4] = b"SVEC";

/// Current file format version
pub(crate) const VERSION: u16 = 1;

/// Header size: magic (4) + version (2) + crc (4)
pub(crate) const HEADER_SIZE: usize = 10;

// =============================================================================
// File Image
// =============================================================================

/// On-disk representation of the store contents
#[derive(Default, Serialize, Deserialize)]
struct FileImage {
    words: HashMap<SlotKey, Word>,
    payloads: HashMap<SlotKey, Vec<u8>>,
}

/// In-memory working state
struct FileState {
    words: HashMap<SlotKey, Word>,
    payloads: HashMap<SlotKey, Bytes>,

    /// Writes applied since the image was last persisted
    dirty_writes: u64,
}

// =============================================================================
// FileStore
// =============================================================================

/// Slot store persisted to a single data file
///
/// Serves reads and writes from memory; rewrites the image per the
/// configured sync strategy and on explicit `sync`/`close`.
pub struct FileStore {
    /// Store configuration
    config: Config,

    /// Working state (slots, payloads, dirty counter)
    state: RwLock<FileState>,
}

impl FileStore {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create the parent directory if it doesn't exist
    /// 2. Load and validate the data file if present
    /// 3. Start empty otherwise
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.data_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let state = if config.data_path.exists() {
            let image = Self::load_image(&config.data_path)?;

            tracing::debug!(
                "Loaded store image: {} slots, {} payloads from {}",
                image.words.len(),
                image.payloads.len(),
                config.data_path.display()
            );

            FileState {
                words: image.words,
                payloads: image
                    .payloads
                    .into_iter()
                    .map(|(key, bytes)| (key, Bytes::from(bytes)))
                    .collect(),
                dirty_writes: 0,
            }
        } else {
            FileState {
                words: HashMap::new(),
                payloads: HashMap::new(),
                dirty_writes: 0,
            }
        };

        Ok(Self {
            config,
            state: RwLock::new(state),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_path(path).build();
        Self::open(config)
    }

    /// Force the image to disk
    pub fn sync(&self) -> Result<()> {
        let mut state = self.state.write();
        Self::persist(&self.config, &mut state)
    }

    /// Close the store gracefully, persisting any pending writes
    pub fn close(self) -> Result<()> {
        let mut state = self.state.write();
        if state.dirty_writes > 0 {
            Self::persist(&self.config, &mut state)?;
        }
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of physically present words (stale slots included)
    pub fn word_count(&self) -> usize {
        self.state.read().words.len()
    }

    /// Number of stored payloads
    pub fn payload_count(&self) -> usize {
        self.state.read().payloads.len()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Read and validate the data file
    fn load_image(path: &Path) -> Result<FileImage> {
        let data = fs::read(path)?;

        if data.len() < HEADER_SIZE {
            return Err(SlotVecError::Corruption(format!(
                "Data file too short: {} bytes (header is {})",
                data.len(),
                HEADER_SIZE
            )));
        }

        if &data[0..4] != MAGIC {
            return Err(SlotVecError::Corruption(format!(
                "Invalid data file magic: expected SVEC, got {:?}",
                &data[0..4]
            )));
        }

        let version = u16::from_le_bytes(data[4..6].try_into().unwrap());
        if version != VERSION {
            return Err(SlotVecError::Corruption(format!(
                "Unsupported data file version: {}",
                version
            )));
        }

        let stored_crc = u32::from_le_bytes(data[6..10].try_into().unwrap());
        let body = &data[HEADER_SIZE..];

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(body);
        let actual_crc = hasher.finalize();

        if actual_crc != stored_crc {
            return Err(SlotVecError::Corruption(format!(
                "CRC mismatch: header says {:#010x}, body hashes to {:#010x}",
                stored_crc, actual_crc
            )));
        }

        bincode::deserialize(body).map_err(|e| SlotVecError::Serialization(e.to_string()))
    }

    /// Serialize the state and rewrite the data file
    ///
    /// Called with the write lock held; resets the dirty counter.
    fn persist(config: &Config, state: &mut FileState) -> Result<()> {
        let image = FileImage {
            words: state.words.clone(),
            payloads: state
                .payloads
                .iter()
                .map(|(key, bytes)| (*key, bytes.to_vec()))
                .collect(),
        };

        let body =
            bincode::serialize(&image).map_err(|e| SlotVecError::Serialization(e.to_string()))?;

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&body);
        let crc = hasher.finalize();

        let mut buffer = Vec::with_capacity(HEADER_SIZE + body.len());
        buffer.extend_from_slice(MAGIC);
        buffer.extend_from_slice(&VERSION.to_le_bytes());
        buffer.extend_from_slice(&crc.to_le_bytes());
        buffer.extend_from_slice(&body);

        fs::write(&config.data_path, buffer)?;
        state.dirty_writes = 0;

        Ok(())
    }

    /// Apply the sync strategy after a write
    ///
    /// Called with the write lock held.
    fn after_write(&self, state: &mut FileState) -> Result<()> {
        state.dirty_writes += 1;

        match self.config.sync_strategy {
            SyncStrategy::EveryWrite => Self::persist(&self.config, state),
            SyncStrategy::EveryNWrites { count } => {
                if state.dirty_writes >= count {
                    Self::persist(&self.config, state)
                } else {
                    Ok(())
                }
            }
            SyncStrategy::Manual => Ok(()),
        }
    }
}

impl StorageBackend for FileStore {
    fn read(&self, key: SlotKey) -> Result<Option<Word>> {
        Ok(self.state.read().words.get(&key).copied())
    }

    fn write(&self, key: SlotKey, word: Word) -> Result<()> {
        let mut state = self.state.write();
        state.words.insert(key, word);
        self.after_write(&mut state)
    }

    fn read_bytes(&self, key: SlotKey) -> Result<Option<Bytes>> {
        Ok(self.state.read().payloads.get(&key).cloned())
    }

    fn write_bytes(&self, key: SlotKey, payload: Bytes) -> Result<()> {
        let mut state = self.state.write();
        state.payloads.insert(key, payload);
        self.after_write(&mut state)
    }
}
