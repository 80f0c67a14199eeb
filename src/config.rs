//! Configuration for memdb
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: whether persistence calls fsync before returning
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Format Configuration
    // -------------------------------------------------------------------------
    /// Pretty-print snapshot JSON (stream files are always one record per line)
    pub pretty_snapshot: bool,

    // -------------------------------------------------------------------------
    // I/O Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the buffered readers/writers used for persistence (bytes)
    pub io_buffer_size: usize,
}

/// Sync strategy for persistence files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Leave flushing to the OS (fastest)
    Never,

    /// fsync the snapshot temp file before rename, and the stream file after
    /// its last record
    OnSave,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_strategy: SyncStrategy::Never,
            pretty_snapshot: false,
            io_buffer_size: 64 * 1024, // 64 KB
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
    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Enable or disable pretty-printed snapshots
    pub fn pretty_snapshot(mut self, pretty: bool) -> Self {
        self.config.pretty_snapshot = pretty;
        self
    }

    /// Set the persistence buffer size (in bytes, minimum 1)
    pub fn io_buffer_size(mut self, size: usize) -> Self {
        self.config.io_buffer_size = size.max(1);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
