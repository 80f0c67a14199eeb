//! Key definitions
//!
//! Two-variant key with explicit text conversions for persistence.

use std::fmt;

/// A key in the Store
///
/// Ordering is total: every `Int` key sorts before every `Text` key, and
/// keys of the same variant use their natural order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Integer key
    Int(i64),

    /// Text key
    Text(String),
}

impl Key {
    /// Render the key to the text form used in persisted files.
    ///
    /// Lossy: `Key::Int(1)` and `Key::Text("1")` render identically.
    pub fn to_text(&self) -> String {
        match self {
            Key::Int(n) => n.to_string(),
            Key::Text(s) => s.clone(),
        }
    }

    /// Reinterpret a persisted text key.
    ///
    /// Yields `Key::Int` only if `text` is non-empty, made entirely of ASCII
    /// decimal digits, and fits in an `i64`. Everything else, including
    /// negative numbers such as `"-5"`, stays `Key::Text`.
    pub fn from_text(text: &str) -> Key {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = text.parse::<i64>() {
                return Key::Int(n);
            }
        }
        Key::Text(text.to_string())
    }

    /// Returns true for integer keys
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Returns true for text keys
    pub fn is_text(&self) -> bool {
        matches!(self, Key::Text(_))
    }

    /// Integer payload, if this is an integer key
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Text(_) => None,
        }
    }

    /// Text payload, if this is a text key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Text(s) => write!(f, "{:?}", s),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n as i64)
    }
}
