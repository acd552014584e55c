//! Per-record enrichment lookups.
//!
//! An [`Enricher`] takes a key from a record (a video id, a page URL),
//! performs one external lookup, and yields text to store in
//! [`NormalizedRecord::content`]. Lookups are independent: a failure is
//! logged and leaves that record's `content` as `None`, and the batch
//! carries on.
//!
//! # Submodules
//!
//! - [`transcript`]: Transcript text for a YouTube video id
//! - [`markdown`]: Primary page text for a URL, rendered as Markdown

use crate::error::EnrichError;
use crate::models::NormalizedRecord;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub mod markdown;
pub mod transcript;

pub use markdown::PageConverter;
pub use transcript::TranscriptFetcher;

/// A fallible, per-record text lookup.
pub trait Enricher {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The lookup key for a record, or `None` if the record does not qualify.
    fn key<'r>(&self, record: &'r NormalizedRecord) -> Option<&'r str>;

    /// Perform the lookup.
    async fn lookup(&self, key: &str) -> Result<String, EnrichError>;
}

/// Run one lookup, collapsing every failure into `None`.
pub async fn lookup_or_absent<E: Enricher>(enricher: &E, key: &str) -> Option<String> {
    let t0 = Instant::now();
    match enricher.lookup(key).await {
        Ok(text) => {
            debug!(
                enricher = enricher.name(),
                %key,
                bytes = text.len(),
                preview = %truncate_for_log(&text, 80),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Lookup succeeded"
            );
            Some(text)
        }
        Err(e) => {
            warn!(
                enricher = enricher.name(),
                %key,
                error = %e,
                "Lookup failed; leaving record unenriched"
            );
            None
        }
    }
}

/// Fill `content` on every qualifying record.
///
/// Lookups run in record order. With `concurrency` above 1, up to that many
/// run at once, but results are still applied in record order. Records
/// with no key keep whatever `content` they had.
///
/// # Returns
///
/// The number of records that received content.
#[instrument(level = "info", skip_all, fields(enricher = enricher.name(), records = records.len(), concurrency = concurrency))]
pub async fn enrich_records<E: Enricher>(
    enricher: &E,
    records: &mut [NormalizedRecord],
    concurrency: usize,
) -> usize {
    let keys: Vec<Option<String>> = records
        .iter()
        .map(|r| enricher.key(r).map(str::to_owned))
        .collect();

    let results: Vec<Option<Option<String>>> = stream::iter(keys)
        .map(|key| async move {
            let Some(key) = key else {
                return None;
            };
            Some(lookup_or_absent(enricher, &key).await)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut filled = 0usize;
    for (record, result) in records.iter_mut().zip(results) {
        if let Some(content) = result {
            if content.is_some() {
                filled += 1;
            }
            record.content = content;
        }
    }

    info!(filled, "Enrichment complete");
    filled
}
