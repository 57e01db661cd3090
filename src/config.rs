//! Configuration for slotvec
//!
//! Centralized configuration for the file-backed store with sensible
//! defaults.

use std::path::PathBuf;

/// Configuration for a file-backed store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the store's data file
    pub data_path: PathBuf,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: how often to persist the image to disk
    pub sync_strategy: SyncStrategy,
}

/// Persistence sync strategy
#[derive(Debug, Clone, Copy)]
pub enum SyncStrategy {
    /// Persist after every write (safest, slowest)
    EveryWrite,

    /// Persist after N writes (balanced durability/performance)
    EveryNWrites { count: u64 },

    /// Persist only on explicit sync/close
    Manual,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./slotvec.db"),
            sync_strategy: SyncStrategy::EveryNWrites { count: 64 },
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data file path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
