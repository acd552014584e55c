//! Output rendering for scraped records.
//!
//! Records are only ever printed; nothing is written to disk.
//!
//! # Submodules
//!
//! - [`text`]: Human-readable listing, one block per record
//! - [`json`]: Pretty-printed JSON array for piping into other tools

pub mod json;
pub mod text;
