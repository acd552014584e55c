//! Time-windowed feed-to-record normalization.
//!
//! Given a source's raw entries and a window size in hours, keep the
//! entries published at or after `now - window` and map them into
//! [`NormalizedRecord`]s. Entries are emitted in the order the feed
//! listed them; nothing is sorted or deduplicated here.
//!
//! # Boundary
//!
//! The cutoff is inclusive: an entry published exactly at the cutoff is
//! kept. The same comparison applies to every source.

use crate::feed::FeedEntry;
use crate::models::NormalizedRecord;
use crate::scrapers::FeedSource;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// The earliest publication time still inside a window ending at `now`.
pub fn cutoff_from(now: DateTime<Utc>, window_hours: u32) -> DateTime<Utc> {
    now - Duration::hours(i64::from(window_hours))
}

/// Filter `entries` to the last `window_hours` and normalize them.
///
/// The cutoff is computed once from the current time before any entry is
/// examined. A window of 0 keeps only entries stamped at or after "now".
pub fn filter_and_normalize<S: FeedSource + ?Sized>(
    source: &S,
    entries: &[FeedEntry],
    window_hours: u32,
) -> Vec<NormalizedRecord> {
    filter_since(source, entries, cutoff_from(Utc::now(), window_hours))
}

/// Filter `entries` against a precomputed cutoff and normalize them.
pub fn filter_since<S: FeedSource + ?Sized>(
    source: &S,
    entries: &[FeedEntry],
    cutoff: DateTime<Utc>,
) -> Vec<NormalizedRecord> {
    entries
        .iter()
        .filter_map(|entry| normalize_entry(source, entry, cutoff))
        .collect()
}

/// Normalize one entry, or `None` if it is undated, too old, or unlocatable.
pub fn normalize_entry<S: FeedSource + ?Sized>(
    source: &S,
    entry: &FeedEntry,
    cutoff: DateTime<Utc>,
) -> Option<NormalizedRecord> {
    let Some(published_at) = entry.published.as_ref().and_then(|p| p.to_utc()) else {
        debug!(source = source.name(), title = ?entry.title, "Dropping entry without a usable date");
        return None;
    };

    if published_at < cutoff {
        return None;
    }

    let Some(locator) = source.locate(entry) else {
        debug!(source = source.name(), title = ?entry.title, "Dropping entry the source cannot locate");
        return None;
    };

    Some(NormalizedRecord {
        source: source.name().to_string(),
        title: entry.title.clone().unwrap_or_default(),
        description: entry.description.clone().unwrap_or_default(),
        url: locator.url,
        published_at,
        category: entry.tags.first().and_then(|t| t.term.clone()),
        video: locator.video,
        content: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{RawTimestamp, Tag, TimeParts};
    use crate::scrapers::Locator;
    use crate::scrapers::youtube::ChannelFeed;
    use chrono::TimeZone;

    struct LinkSource;

    impl FeedSource for LinkSource {
        fn name(&self) -> &str {
            "test"
        }

        fn feed_urls(&self) -> Vec<String> {
            vec![]
        }

        fn locate(&self, entry: &FeedEntry) -> Option<Locator> {
            Some(Locator {
                url: entry.link.clone().unwrap_or_default(),
                video: None,
            })
        }
    }

    fn cutoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    fn dated(title: &str, at: DateTime<Utc>) -> FeedEntry {
        FeedEntry {
            title: Some(title.to_string()),
            description: Some(format!("{title} description")),
            link: Some(format!("https://example.com/{title}")),
            published: Some(RawTimestamp::Parts(TimeParts::from_utc(&at))),
            ..Default::default()
        }
    }

    #[test]
    fn test_cutoff_from_window() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 10, 30, 0).unwrap();
        assert_eq!(cutoff_from(now, 24), cutoff());
        assert_eq!(cutoff_from(now, 0), now);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let entries = vec![
            dated("before", cutoff() - Duration::seconds(1)),
            dated("at", cutoff()),
            dated("after", cutoff() + Duration::seconds(1)),
        ];

        let records = filter_since(&LinkSource, &entries, cutoff());
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["at", "after"]);
    }

    #[test]
    fn test_iso_boundary_matches_parts_boundary() {
        let mut at = dated("at", cutoff());
        at.published = Some(RawTimestamp::Iso8601("2024-01-15T10:30:00Z".to_string()));
        let mut before = dated("before", cutoff());
        before.published = Some(RawTimestamp::Iso8601("2024-01-15T10:29:59Z".to_string()));

        let records = filter_since(&LinkSource, &[before, at], cutoff());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "at");
        assert_eq!(records[0].published_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_missing_or_bad_date_is_dropped() {
        let mut undated = dated("undated", cutoff());
        undated.published = None;
        let mut garbled = dated("garbled", cutoff());
        garbled.published = Some(RawTimestamp::Iso8601("not a date".to_string()));

        let records = filter_since(&LinkSource, &[undated, garbled], cutoff());
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_since(&LinkSource, &[], cutoff()).is_empty());
        assert!(filter_and_normalize(&LinkSource, &[], 24).is_empty());
    }

    #[test]
    fn test_missing_title_and_description_default_to_empty() {
        let entry = FeedEntry {
            published: Some(RawTimestamp::Parts(TimeParts::from_utc(&cutoff()))),
            ..Default::default()
        };

        let records = filter_since(&LinkSource, &[entry], cutoff());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].description, "");
        assert_eq!(records[0].url, "");
        assert_eq!(records[0].content, None);
    }

    #[test]
    fn test_category_is_first_tag_term() {
        let mut tagged = dated("tagged", cutoff());
        tagged.tags = vec![Tag::new("research"), Tag::new("policy")];
        let untagged = dated("untagged", cutoff());

        let records = filter_since(&LinkSource, &[tagged, untagged], cutoff());
        assert_eq!(records[0].category.as_deref(), Some("research"));
        assert_eq!(records[1].category, None);
    }

    #[test]
    fn test_feed_order_is_preserved() {
        let entries = vec![
            dated("older", cutoff() + Duration::hours(1)),
            dated("newest", cutoff() + Duration::hours(5)),
            dated("middle", cutoff() + Duration::hours(3)),
        ];

        let records = filter_since(&LinkSource, &entries, cutoff());
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["older", "newest", "middle"]);
    }

    #[test]
    fn test_recent_entries_survive_live_window() {
        let now = Utc::now();
        let entries = vec![dated("fresh", now + Duration::minutes(1)), dated("stale", now - Duration::hours(30))];

        let records = filter_and_normalize(&LinkSource, &entries, 24);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "fresh");
        assert_eq!(records[0].source, "test");
    }

    #[test]
    fn test_video_url_is_derived_from_id() {
        let source = ChannelFeed::new("UC123");
        let mut entry = dated("talk", cutoff());
        entry.link = Some("https://example.com/ignored".to_string());
        entry.video.video_id = Some("abc123".to_string());

        let records = filter_since(&source, &[entry], cutoff());
        assert_eq!(records[0].url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(records[0].video_id(), Some("abc123"));
    }
}
