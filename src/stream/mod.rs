//! Stream Persistence Module
//!
//! Line-delimited, per-entry persistence for the Store.
//!
//! ## Responsibilities
//! - Write one self-contained JSON record per entry
//! - Read records back one line at a time (bounded memory)
//! - Report the line number of the first malformed record
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ {"key":"a1","value":1}\n                     │  <- record 1
//! ├──────────────────────────────────────────────┤
//! │ {"key":"1","value":"a3"}\n                   │  <- record 2
//! ├──────────────────────────────────────────────┤
//! │ {"key":"a2","val                             │  <- truncated tail
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The file is rewritten from scratch on every save and is not
//! replace-atomic. A crash mid-write leaves a valid prefix of complete lines
//! followed by at most one truncated line; readers stop at the truncated line
//! and report it as a parse failure.

mod record;
mod writer;
mod reader;

pub use record::StreamRecord;
pub use writer::StreamWriter;
pub use reader::{RestoreReport, StreamReader};
