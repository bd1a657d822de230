//!  Storage is organized through [entry_storage::JsonLinesEntryStorage].
//!  The basic idea is:
//!   - There is a directory with a single `entries.jsonl` file.
//!   - Every recorded entry is appended to it as one json line and never rewritten.
//!   - Queries read the whole file and filter in memory.

pub mod entities;
pub mod entry_storage;
