//! Stream record definitions
//!
//! One line of a stream file.

use serde::{Deserialize, Serialize};

use crate::types::{Key, Value};

/// A single record in a stream file: `{"key": <text>, "value": <Value>}`
///
/// Unknown fields are ignored on decode; both `key` and `value` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamRecord {
    /// Text-rendered key (see `Key::to_text`)
    pub key: String,

    /// The stored value
    pub value: Value,
}

impl StreamRecord {
    /// Build a record from a live entry
    pub fn new(key: &Key, value: Value) -> Self {
        Self {
            key: key.to_text(),
            value,
        }
    }

    /// Split into a live entry, reinterpreting the key via `Key::from_text`
    pub fn into_entry(self) -> (Key, Value) {
        (Key::from_text(&self.key), self.value)
    }
}

/// Borrowed form used when writing, so values are not cloned
#[derive(Serialize)]
pub(super) struct RecordRef<'a> {
    pub key: &'a str,
    pub value: &'a Value,
}
