//! Error types for feed retrieval and per-record enrichment.
//!
//! Neither error ever reaches a caller of the scrapers: a failed feed
//! contributes no entries and a failed lookup leaves the record's
//! `content` empty. The variants exist so the failure can be logged with
//! its actual cause.

use thiserror::Error;

/// Failure to fetch or parse a single feed document.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP status {0}")]
    Status(u16),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("feed body does not match the expected shape: {0}")]
    Deserialize(#[from] quick_xml::de::DeError),

    #[error("unrecognized feed root element <{0}>")]
    UnknownFormat(String),
}

/// Failure of a transcript or page-conversion lookup.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lookup returned HTTP status {0}")]
    Status(u16),

    #[error("transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("no English transcript found for video {0}")]
    NoTranscriptFound(String),

    #[error("video {video_id} is unavailable: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error("request was blocked by the remote service")]
    RequestBlocked,

    #[error("unexpected response: {0}")]
    Malformed(String),

    #[error("document at {0} has no extractable text")]
    EmptyDocument(String),
}

impl From<quick_xml::de::DeError> for EnrichError {
    fn from(e: quick_xml::de::DeError) -> Self {
        EnrichError::Malformed(e.to_string())
    }
}

impl From<serde_json::Error> for EnrichError {
    fn from(e: serde_json::Error) -> Self {
        EnrichError::Malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrich_error_messages_name_the_video() {
        let e = EnrichError::TranscriptsDisabled("abc123".to_string());
        assert_eq!(e.to_string(), "transcripts are disabled for video abc123");

        let e = EnrichError::VideoUnavailable {
            video_id: "abc123".to_string(),
            reason: "Private video".to_string(),
        };
        assert!(e.to_string().contains("Private video"));
    }

    #[test]
    fn test_json_error_becomes_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: EnrichError = err.into();
        assert!(matches!(e, EnrichError::Malformed(_)));
    }
}
