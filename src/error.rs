//! Error types for slotvec
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SlotVecError
pub type Result<T> = std::result::Result<T, SlotVecError>;

/// Unified error type for slotvec operations
#[derive(Debug, Error)]
pub enum SlotVecError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Precondition Errors
    // -------------------------------------------------------------------------
    #[error("Vector is empty")]
    Empty,

    #[error("Index {index} out of bounds (length {len})")]
    OutOfBounds { index: u64, len: u64 },

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Storage corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),
}
