//! Store Module
//!
//! The guarded map and every operation against it.
//!
//! ## Responsibilities
//! - Point lookups, upserts, insert-if-absent, deletes
//! - Independent copies for bulk reads and predicate filters
//! - Snapshot and stream persistence under the same gate

use std::cell::RefCell;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::Path;

use parking_lot::{Mutex, MutexGuard};

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::snapshot;
use crate::stream::{RestoreReport, StreamReader, StreamWriter};
use crate::types::{Key, Value};

type Map = BTreeMap<Key, Value>;

/// A concurrency-safe in-process key-value store
///
/// ## Concurrency Model: Single Exclusive Gate
///
/// - One `Mutex` covers the whole map
/// - Every operation, reads included, holds it for its full duration
/// - Persistence holds it across file I/O, so a slow disk stalls all callers
///
/// Share across threads with `Arc<Store>`.
///
/// ## Re-entrancy
///
/// The gate is not re-entrant. A `filter` predicate that calls back into the
/// same Store panics instead of deadlocking.
pub struct Store {
    config: Config,
    data: Mutex<Map>,
}

impl Store {
    /// Create an empty store with default config
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty store with the given config
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            data: Mutex::new(Map::new()),
        }
    }

    // =========================================================================
    // Core Operations
    // =========================================================================

    /// Get a value by key
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.gate().get(key).cloned()
    }

    /// Put a key-value pair, overwriting any existing value
    pub fn put(&self, key: impl Into<Key>, value: impl Into<Value>) {
        self.gate().insert(key.into(), value.into());
    }

    /// Insert a key-value pair only if the key is absent
    ///
    /// Returns `false` and leaves the map unchanged if the key exists.
    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> bool {
        let mut data = self.gate();
        match data.entry(key.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
        }
    }

    /// Delete a key. Returns `false` if it was absent.
    pub fn delete(&self, key: &Key) -> bool {
        self.gate().remove(key).is_some()
    }

    /// Independent copy of every entry
    pub fn get_all(&self) -> BTreeMap<Key, Value> {
        (*self.gate()).clone()
    }

    /// Replace the map with an empty one
    pub fn clear(&self) {
        let mut data = self.gate();
        *data = Map::new();
    }

    /// Independent copy of the entries for which `predicate` returns true
    ///
    /// The predicate runs once per entry while the gate is held. It must not
    /// call back into this Store; doing so panics.
    pub fn filter<F>(&self, mut predicate: F) -> BTreeMap<Key, Value>
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.gate()
            .iter()
            .filter(|&(k, v)| predicate(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.gate().len()
    }

    /// Check if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.gate().is_empty()
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &Key) -> bool {
        self.gate().contains_key(key)
    }

    // =========================================================================
    // Snapshot Persistence
    // =========================================================================

    /// Save the whole map to `path` with atomic replacement
    ///
    /// Returns `false` on any failure; the map is never affected.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        log_outcome("save snapshot", path, self.try_save_snapshot(path))
    }

    /// Merge the snapshot at `path` into the map
    ///
    /// Returns `false` if the file is missing or malformed; the file is
    /// parsed in full before merging, so a failure leaves the map unchanged.
    /// For replace semantics call `clear` first.
    pub fn restore_snapshot(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        log_outcome("restore snapshot", path, self.try_restore_snapshot(path))
    }

    /// `save_snapshot`, returning the number of fields written or the error
    pub fn try_save_snapshot(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let data = self.gate();

        let written = snapshot::write_snapshot(data.iter(), path, &self.config)?;
        tracing::info!("Snapshot saved: {} entries to {}", written, path.display());

        Ok(written)
    }

    /// `restore_snapshot`, returning the number of entries merged or the error
    pub fn try_restore_snapshot(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let mut data = self.gate();

        let entries = snapshot::read_snapshot(path, &self.config)?;
        let merged = entries.len();
        data.extend(entries);

        tracing::info!("Snapshot restored: {} entries from {}", merged, path.display());
        Ok(merged)
    }

    // =========================================================================
    // Stream Persistence
    // =========================================================================

    /// Write one line per entry to `path`, truncating it first
    ///
    /// Not replace-atomic: a crash mid-write leaves a truncated file.
    pub fn save_stream(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        log_outcome("save stream", path, self.try_save_stream(path))
    }

    /// Merge the stream file at `path` into the map, line by line
    ///
    /// Stops at the first malformed line and returns `false`. Entries merged
    /// from earlier lines stay in the map.
    pub fn restore_stream(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        log_outcome("restore stream", path, self.try_restore_stream(path))
    }

    /// `save_stream`, returning the number of records written or the error
    pub fn try_save_stream(&self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let data = self.gate();

        // Checked up front so a rejected save leaves the old file in place
        for (key, value) in data.iter() {
            StoreError::check_nesting(key, value)?;
        }

        let mut writer = StreamWriter::create(path, &self.config)?;
        for (key, value) in data.iter() {
            writer.append(key, value)?;
        }
        let written = writer.finish()?;

        tracing::info!("Stream saved: {} records to {}", written, path.display());
        Ok(written)
    }

    /// `restore_stream`, returning what was merged or the error
    pub fn try_restore_stream(&self, path: impl AsRef<Path>) -> Result<RestoreReport> {
        let path = path.as_ref();
        let mut data = self.gate();

        let mut reader = StreamReader::open(path, self.config.io_buffer_size)?;
        let mut applied = 0;

        loop {
            match reader.next_record() {
                Ok(Some((key, value))) => {
                    data.insert(key, value);
                    applied += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(
                        "Stream restore from {} stopped at line {}: {} records already merged",
                        path.display(),
                        reader.lines_read(),
                        applied
                    );
                    return Err(e);
                }
            }
        }

        let report = RestoreReport {
            records_applied: applied,
            lines_read: reader.lines_read(),
        };
        tracing::info!("Stream restored: {} records from {}", applied, path.display());

        Ok(report)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Acquire the exclusive gate
    fn gate(&self) -> Gate<'_> {
        Gate::acquire(self)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Log a persistence failure and fold the result into a boolean
fn log_outcome<T>(op: &str, path: &Path, result: Result<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(StoreError::MissingFile(_)) => {
            tracing::debug!("Cannot {}: {} does not exist", op, path.display());
            false
        }
        Err(e) => {
            tracing::warn!("Failed to {} at {}: {}", op, path.display(), e);
            false
        }
    }
}

// =============================================================================
// Exclusive Gate
// =============================================================================

thread_local! {
    /// Stores whose gate is held by the current thread
    static HELD: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Guard over the map; releases the gate on drop, including during unwinding
struct Gate<'a> {
    guard: MutexGuard<'a, Map>,
    owner: usize,
}

impl<'a> Gate<'a> {
    fn acquire(store: &'a Store) -> Self {
        let owner = store as *const Store as usize;

        let reentered = HELD.with(|held| held.borrow().contains(&owner));
        if reentered {
            panic!("re-entrant Store access: the gate is already held by this thread (is a filter predicate calling back into the Store?)");
        }

        let guard = store.data.lock();
        HELD.with(|held| held.borrow_mut().push(owner));

        Self { guard, owner }
    }
}

impl Drop for Gate<'_> {
    fn drop(&mut self) {
        let owner = self.owner;
        HELD.with(|held| {
            let mut held = held.borrow_mut();
            if let Some(pos) = held.iter().rposition(|&id| id == owner) {
                held.swap_remove(pos);
            }
        });
    }
}

impl Deref for Gate<'_> {
    type Target = Map;

    fn deref(&self) -> &Map {
        &self.guard
    }
}

impl DerefMut for Gate<'_> {
    fn deref_mut(&mut self) -> &mut Map {
        &mut self.guard
    }
}
