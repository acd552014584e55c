//! JSON rendering of records.
//!
//! The output is a single pretty-printed array in record order. Timestamps
//! serialize as RFC 3339 UTC strings and absent optional fields as `null`,
//! except `video`, which is omitted for non-video records.

use crate::models::NormalizedRecord;

/// Serialize `records` as a pretty-printed JSON array.
pub fn records_to_json(records: &[NormalizedRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
