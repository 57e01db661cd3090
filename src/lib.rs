//! # slotvec
//!
//! A persistent, dynamically-sized storage vector over a flat keyed
//! slot store:
//! - Array-like semantics (get/set, push/pop, insert/remove, swap,
//!   resize, fill, reverse)
//! - Every element lives in its own individually addressed storage slot
//! - Minimal slot reads/writes per operation (each one is metered I/O)
//! - Pluggable storage backends (in-memory, file-backed)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Caller / CLI                          │
//! │                   (routes named commands)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   StorageVec<T, S>                           │
//! │        (length bookkeeping + slot-level operations)          │
//! └──────────┬─────────────────────────────────┬────────────────┘
//!            │                                 │
//!            ▼                                 ▼
//!     ┌─────────────┐                   ┌─────────────┐
//!     │     Key     │                   │    Codec    │
//!     │ (derivation)│                   │ (elements)  │
//!     └─────────────┘                   └──────┬──────┘
//!                                              │
//!                                              ▼
//!                                      ┌─────────────┐
//!                                      │   Backend   │
//!                                      │ (slot store)│
//!                                      └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod codec;
pub mod store;
pub mod vec;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use bytes::Bytes;

pub use error::{Result, SlotVecError};
pub use config::Config;
pub use codec::{SlotElement, Word};
pub use key::{BaseKey, SlotKey};
pub use store::{FileStore, MemoryStore, StorageBackend};
pub use vec::StorageVec;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of slotvec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
