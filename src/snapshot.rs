//! Snapshot Module
//!
//! Whole-map persistence with atomic file replacement.
//!
//! ## Write Path
//! ```text
//!   map ──(Key::to_text)──> {"k": v, ...} ──> path.tmp ──(rename)──> path
//! ```
//! The rename is the commit point. A crash before it leaves the previous
//! snapshot untouched; a crash after it leaves the new one in place.
//!
//! ## Read Path
//! The whole file is parsed before any key is handed back, so a malformed
//! snapshot never yields a partial result.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{Config, SyncStrategy};
use crate::error::{Result, StoreError};
use crate::types::{Key, Value};

/// Suffix appended to the target path for the in-progress file
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path of the temporary file colocated with `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Write a snapshot of `entries` to `path`
///
/// Returns the number of fields written. Keys that render to the same text
/// (`Key::Int(1)` and `Key::Text("1")`) collapse to one field; the entry
/// iterated last wins. A value nested deeper than `MAX_NESTING` fails the
/// save before the temporary file is created.
pub fn write_snapshot<'a, I>(entries: I, path: &Path, config: &Config) -> Result<usize>
where
    I: IntoIterator<Item = (&'a Key, &'a Value)>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut projected: BTreeMap<String, &Value> = BTreeMap::new();
    for (key, value) in entries {
        StoreError::check_nesting(key, value)?;
        if projected.insert(key.to_text(), value).is_some() {
            tracing::debug!("Snapshot key {} collides with an earlier key of the other kind", key);
        }
    }

    let tmp = temp_path(path);
    if let Err(e) = write_temp(&projected, &tmp, config) {
        // Best effort: the target path is untouched either way
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    Ok(projected.len())
}

fn write_temp(projected: &BTreeMap<String, &Value>, tmp: &Path, config: &Config) -> Result<()> {
    let file = File::create(tmp)?;
    let mut writer = BufWriter::with_capacity(config.io_buffer_size, file);

    if config.pretty_snapshot {
        serde_json::to_writer_pretty(&mut writer, projected).map_err(StoreError::encode)?;
    } else {
        serde_json::to_writer(&mut writer, projected).map_err(StoreError::encode)?;
    }

    writer.flush()?;
    if config.sync_strategy == SyncStrategy::OnSave {
        writer.get_ref().sync_all()?;
    }

    Ok(())
}

/// Read a snapshot from `path`
///
/// Keys are passed through `Key::from_text`. Fails with
/// `StoreError::MissingFile` if `path` does not exist.
pub fn read_snapshot(path: &Path, config: &Config) -> Result<Vec<(Key, Value)>> {
    if !path.exists() {
        return Err(StoreError::MissingFile(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = BufReader::with_capacity(config.io_buffer_size, file);

    let object: BTreeMap<String, Value> =
        serde_json::from_reader(reader).map_err(|e| StoreError::decode(e, None))?;

    Ok(object
        .into_iter()
        .map(|(text, value)| (Key::from_text(&text), value))
        .collect())
}
