//! # memdb
//!
//! A concurrency-safe, in-process key-value store with:
//! - Text and integer keys, JSON-shaped values
//! - Point lookups, bulk reads and predicate filters
//! - Whole-map snapshots with atomic file replacement
//! - Line-delimited streaming persistence with bounded-memory restore
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Callers                              │
//! │                   (Arc<Store> per thread)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Exclusive Gate                            │
//! │           (one Mutex, reads and writes alike)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────────┐
//!          │            │                 │
//!          ▼            ▼                 ▼
//!   ┌─────────────┐ ┌──────────┐  ┌──────────────┐
//!   │  Snapshot   │ │   Map    │  │    Stream    │
//!   │ (tmp+rename)│ │(BTreeMap)│  │ (JSON lines) │
//!   └─────────────┘ └──────────┘  └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use memdb::{Key, Store, Value};
//!
//! let store = Store::new();
//! store.put("a1", 1);
//! store.put(1, "a3");
//!
//! let big = store.filter(|_, v| matches!(v, Value::Int(n) if *n > 0));
//! assert_eq!(big.len(), 1);
//!
//! assert!(store.save_snapshot("data/snapshot.json"));
//! store.clear();
//! assert!(store.restore_snapshot("data/snapshot.json"));
//! assert_eq!(store.get(&Key::Int(1)), Some(Value::from("a3")));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod types;
pub mod snapshot;
pub mod stream;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::{Config, SyncStrategy};
pub use types::{Key, Value, ValueKind, MAX_NESTING};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
