//! # Awful AI Feeds
//!
//! Polls the feeds of a handful of AI vendors and YouTube channels, keeps
//! the entries published within a recent time window, and normalizes them
//! into one record shape.
//!
//! ## Features
//!
//! - RSS 2.0, RSS 1.0 (RDF) and Atom parsing
//! - Anthropic news, research and engineering feeds, and the OpenAI news feed
//! - YouTube channel uploads, with live streams told apart from videos
//! - Optional per-record enrichment: video transcripts and page-to-Markdown
//!
//! ## Architecture
//!
//! 1. **Fetching**: Download each feed of a source in declaration order ([`feed`])
//! 2. **Filtering**: Drop entries older than the cutoff ([`window`])
//! 3. **Normalizing**: Map entries into [`models::NormalizedRecord`]s ([`scrapers`])
//! 4. **Enriching**: Fill each record's `content` with a fallible lookup ([`enrich`])
//! 5. **Output**: Render records as text or JSON ([`outputs`])

pub mod enrich;
pub mod error;
pub mod feed;
pub mod http;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;
pub mod window;
