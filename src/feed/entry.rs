//! Raw feed entries as produced by the parser, before any filtering.

use chrono::{DateTime, TimeZone, Utc};

/// One item parsed from an RSS or Atom document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub published: Option<RawTimestamp>,
    pub tags: Vec<Tag>,
    pub video: VideoFields,
}

/// A category tag attached to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub term: Option<String>,
}

impl Tag {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
        }
    }
}

/// Video-platform extension fields (`yt:*` elements).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFields {
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
    pub live_broadcast: Option<String>,
}

/// Broken-down calendar time, already expressed in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeParts {
    pub fn from_utc(dt: &DateTime<Utc>) -> Self {
        use chrono::{Datelike, Timelike};
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }
}

/// The publication date exactly as the feed format represents it.
///
/// RSS dates arrive pre-split into [`TimeParts`]; Atom dates stay as the
/// ISO-8601 string from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTimestamp {
    Parts(TimeParts),
    Iso8601(String),
}

impl RawTimestamp {
    /// Resolve to a UTC instant, or `None` when the value cannot be parsed.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Parts(p) => Utc
                .with_ymd_and_hms(p.year, p.month, p.day, p.hour, p.minute, p.second)
                .single(),
            RawTimestamp::Iso8601(s) => {
                let s = s.trim();
                let normalized = match s.strip_suffix('Z') {
                    Some(stem) => format!("{stem}+00:00"),
                    None => s.to_string(),
                };
                DateTime::parse_from_rfc3339(&normalized)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }
        }
    }
}
