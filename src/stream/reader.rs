//! Stream Reader
//!
//! Handles reading records from a stream file, one line at a time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::types::{Key, Value};

use super::StreamRecord;

/// Reads records from a stream file
///
/// Iterates `Result<(Key, Value)>` with keys already passed through
/// `Key::from_text`. The first error ends the iteration.
pub struct StreamReader {
    reader: BufReader<File>,
    path: PathBuf,
    buf: Vec<u8>,
    lines_read: usize,
    records_read: usize,
    done: bool,
}

/// Outcome of a successful stream restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreReport {
    /// Records merged into the map
    pub records_applied: usize,

    /// Lines consumed, including skipped blank lines
    pub lines_read: usize,
}

impl StreamReader {
    /// Open a stream file for reading
    ///
    /// Fails with `StoreError::MissingFile` if `path` does not exist.
    pub fn open(path: &Path, buffer_size: usize) -> Result<Self> {
        if !path.exists() {
            return Err(StoreError::MissingFile(path.to_path_buf()));
        }

        let file = File::open(path)?;

        Ok(Self {
            reader: BufReader::with_capacity(buffer_size.max(1), file),
            path: path.to_path_buf(),
            buf: Vec::new(),
            lines_read: 0,
            records_read: 0,
            done: false,
        })
    }

    /// Read the next record
    ///
    /// Returns `Ok(None)` at end of file. Blank lines are skipped.
    pub fn next_record(&mut self) -> Result<Option<(Key, Value)>> {
        loop {
            self.buf.clear();
            let n = self.reader.read_until(b'\n', &mut self.buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.lines_read += 1;

            let line = self.buf.trim_ascii();
            if line.is_empty() {
                continue;
            }

            let record: StreamRecord = serde_json::from_slice(line)
                .map_err(|e| StoreError::decode(e, Some(self.lines_read)))?;
            self.records_read += 1;

            return Ok(Some(record.into_entry()));
        }
    }

    /// Lines consumed so far (1-based count)
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Records successfully decoded so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Path of the file being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for StreamReader {
    type Item = Result<(Key, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_record() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
