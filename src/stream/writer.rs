//! Stream Writer
//!
//! Handles writing entries to a stream file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, SyncStrategy};
use crate::error::{Result, StoreError};
use crate::types::{Key, Value};

use super::record::RecordRef;

/// Writes records to a stream file, one JSON object per line
pub struct StreamWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    sync_strategy: SyncStrategy,
    records_written: u64,
}

impl StreamWriter {
    /// Create (or truncate) a stream file, creating its parent directory
    pub fn create(path: &Path, config: &Config) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;

        Ok(Self {
            writer: BufWriter::with_capacity(config.io_buffer_size, file),
            path: path.to_path_buf(),
            sync_strategy: config.sync_strategy,
            records_written: 0,
        })
    }

    /// Append one entry as a newline-terminated record
    ///
    /// Fails with `StoreError::TooDeep` before writing anything if the value
    /// nests deeper than `MAX_NESTING`.
    pub fn append(&mut self, key: &Key, value: &Value) -> Result<()> {
        StoreError::check_nesting(key, value)?;
        let rendered = key.to_text();
        let record = RecordRef {
            key: &rendered,
            value,
        };

        serde_json::to_writer(&mut self.writer, &record).map_err(StoreError::encode)?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;

        Ok(())
    }

    /// Flush buffered records (and fsync under `SyncStrategy::OnSave`)
    ///
    /// Returns the number of records written.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;

        if self.sync_strategy == SyncStrategy::OnSave {
            self.writer.get_ref().sync_all()?;
        }

        tracing::debug!(
            "Stream file {} written: {} records",
            self.path.display(),
            self.records_written
        );

        Ok(self.records_written)
    }

    /// Number of records appended so far
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Path of the file being written
    pub fn path(&self) -> &Path {
        &self.path
    }
}
