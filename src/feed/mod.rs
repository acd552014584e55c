//! Feed retrieval and parsing.
//!
//! - [`entry`]: The raw [`FeedEntry`] shape every parser produces
//! - [`parse`]: RSS/Atom documents into entries
//! - [`fetch`]: HTTP download of a feed URL

pub mod entry;
pub mod fetch;
pub mod parse;

pub use entry::{FeedEntry, RawTimestamp, Tag, TimeParts, VideoFields};
pub use fetch::{fetch_entries_or_empty, fetch_feed};
pub use parse::{FeedFormat, parse_feed};
