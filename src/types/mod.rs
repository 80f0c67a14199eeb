//! Types Module
//!
//! The key and value model held by the Store.
//!
//! ## Keys
//! A key is either text or an integer. The two never compare equal, so
//! `Key::Text("1")` and `Key::Int(1)` are distinct entries in memory.
//!
//! ## Persistence Projection
//! Persisted files only carry text keys. Two named conversions bridge the gap:
//! - `Key::to_text`   — integers become decimal text, text passes through
//! - `Key::from_text` — all-digit text becomes an integer, anything else stays text
//!
//! The round trip is lossy by construction: a text key such as `"42"` comes
//! back as `Key::Int(42)`.

mod key;
mod value;

pub use key::Key;
pub use value::{Value, ValueKind, MAX_NESTING};
