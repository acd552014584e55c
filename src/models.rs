//! Data models for normalized feed records.
//!
//! This module defines the output shape shared by every source:
//! - [`NormalizedRecord`]: One recent feed entry, mapped into uniform fields
//! - [`VideoIdentity`]: Extra identity fields carried by video-platform records
//! - [`VideoKind`]: Whether a video entry looks like a live broadcast
//!
//! Records are built fresh on every scrape. The only field written after
//! construction is [`NormalizedRecord::content`], which the enrichment pass
//! fills with transcript text or page Markdown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Template used to turn a YouTube video id into a watch URL.
pub const VIDEO_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Build the canonical watch URL for a video id.
pub fn video_url(video_id: &str) -> String {
    format!("{VIDEO_URL_PREFIX}{video_id}")
}

/// A feed entry that fell inside the requested time window.
///
/// # Fields
///
/// * `source` - Name of the source that produced the record (e.g. `"anthropic"`)
/// * `title` / `description` - Empty strings when the feed omitted them
/// * `url` - Entry link, or the derived watch URL for videos
/// * `published_at` - Publication time, always UTC
/// * `category` - Term of the entry's first tag
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NormalizedRecord {
    /// Name of the source that produced this record.
    pub source: String,
    /// Entry title.
    pub title: String,
    /// Entry description or summary.
    pub description: String,
    /// Link to the full item.
    pub url: String,
    /// Publication timestamp in UTC.
    pub published_at: DateTime<Utc>,
    /// Term of the first tag, if the entry had any tags.
    pub category: Option<String>,
    /// Video identity, present only for video-platform sources.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub video: Option<VideoIdentity>,
    /// Enrichment text (transcript or page Markdown) filled in a second pass.
    pub content: Option<String>,
}

impl NormalizedRecord {
    /// The video id, when this record came from a video source.
    pub fn video_id(&self) -> Option<&str> {
        self.video.as_ref().map(|v| v.video_id.as_str())
    }
}

/// Identity fields for a video entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoIdentity {
    pub video_id: String,
    pub channel_id: Option<String>,
    pub kind: VideoKind,
}

/// Coarse classification of a video entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    Video,
    Live,
}

impl VideoKind {
    /// Classify a video from its title and the feed's live-broadcast marker.
    ///
    /// A title mentioning "live" or "stream" (any case), or a broadcast
    /// marker of `live`, makes it [`VideoKind::Live`].
    pub fn classify(title: &str, live_broadcast: Option<&str>) -> Self {
        let title = title.to_lowercase();
        if title.contains("live")
            || title.contains("stream")
            || live_broadcast.is_some_and(|b| b.eq_ignore_ascii_case("live"))
        {
            VideoKind::Live
        } else {
            VideoKind::Video
        }
    }
}
