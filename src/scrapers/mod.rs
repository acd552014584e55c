//! Feed sources and the scraper that polls them.
//!
//! Every source follows the same pattern:
//!
//! 1. **Fetching**: Download each of the source's feed URLs, in declaration order
//! 2. **Filtering**: Keep entries inside the time window (see [`crate::window`])
//! 3. **Normalizing**: Map entries into [`NormalizedRecord`]s
//!
//! Sources only differ in which URLs they poll and how an entry's link is
//! resolved, which is what the [`FeedSource`] trait captures.
//!
//! # Supported Sources
//!
//! | Source | Module | Feeds | Link |
//! |--------|--------|-------|------|
//! | Anthropic | [`anthropic`] | news, research, engineering | entry link |
//! | OpenAI | [`openai`] | news | entry link |
//! | YouTube | [`youtube`] | one per channel | derived from video id |
//!
//! A failed feed contributes no entries; the scrape moves on to the next
//! feed. Records from several feeds of one source are concatenated with no
//! deduplication, so a post listed in two feeds appears twice.

use crate::feed::{FeedEntry, fetch_entries_or_empty};
use crate::models::{NormalizedRecord, VideoIdentity};
use crate::window::{cutoff_from, filter_since};
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, instrument};

pub mod anthropic;
pub mod openai;
pub mod youtube;

/// Where a normalized record points, as decided by its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    pub url: String,
    pub video: Option<VideoIdentity>,
}

/// Capabilities that distinguish one feed source from another.
pub trait FeedSource {
    /// Short, stable name stamped onto every record.
    fn name(&self) -> &str;

    /// Feed URLs to poll, in the order they should be fetched.
    fn feed_urls(&self) -> Vec<String>;

    /// Resolve an entry's URL and identity; `None` drops the entry.
    fn locate(&self, entry: &FeedEntry) -> Option<Locator>;
}

/// A source that publishes ordinary articles over one or more fixed feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorFeed {
    pub name: &'static str,
    pub feeds: &'static [&'static str],
}

impl FeedSource for VendorFeed {
    fn name(&self) -> &str {
        self.name
    }

    fn feed_urls(&self) -> Vec<String> {
        self.feeds.iter().map(|u| u.to_string()).collect()
    }

    fn locate(&self, entry: &FeedEntry) -> Option<Locator> {
        Some(Locator {
            url: entry.link.clone().unwrap_or_default(),
            video: None,
        })
    }
}

/// Polls every feed of a [`FeedSource`] and returns its recent records.
#[derive(Debug, Clone)]
pub struct FeedScraper<S> {
    client: Client,
    source: S,
}

impl<S: FeedSource> FeedScraper<S> {
    pub fn new(client: Client, source: S) -> Self {
        Self { client, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collect records published within the last `hours` across all feeds.
    ///
    /// The cutoff is fixed once, before the first feed is fetched, so every
    /// feed of the source is judged against the same instant.
    #[instrument(level = "info", skip(self), fields(source = self.source.name()))]
    pub async fn get_records(&self, hours: u32) -> Vec<NormalizedRecord> {
        let cutoff = cutoff_from(Utc::now(), hours);
        let mut records = Vec::new();

        for url in self.source.feed_urls() {
            let entries = fetch_entries_or_empty(&self.client, &url).await;
            let before = records.len();
            records.extend(filter_since(&self.source, &entries, cutoff));
            debug!(%url, entries = entries.len(), kept = records.len() - before, "Filtered feed");
        }

        info!(count = records.len(), %cutoff, "Collected recent records");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, SecondsFormat};

    fn rss_with(title: &str, link: &str, hours_ago: i64) -> String {
        let at = (Utc::now() - Duration::hours(hours_ago)).to_rfc2822();
        format!(
            r#"<rss version="2.0"><channel><title>t</title>
<item><title>{title}</title><link>{link}</link><pubDate>{at}</pubDate><category>News</category></item>
</channel></rss>"#
        )
    }

    #[derive(Debug)]
    struct ServerSource {
        urls: Vec<String>,
    }

    impl FeedSource for ServerSource {
        fn name(&self) -> &str {
            "server"
        }

        fn feed_urls(&self) -> Vec<String> {
            self.urls.clone()
        }

        fn locate(&self, entry: &FeedEntry) -> Option<Locator> {
            Some(Locator {
                url: entry.link.clone().unwrap_or_default(),
                video: None,
            })
        }
    }

    #[test]
    fn test_vendor_feed_uses_entry_link() {
        let source = VendorFeed {
            name: "vendor",
            feeds: &["https://example.com/a.xml", "https://example.com/b.xml"],
        };
        let entry = FeedEntry {
            link: Some("https://example.com/post".to_string()),
            ..Default::default()
        };

        assert_eq!(source.feed_urls().len(), 2);
        let locator = source.locate(&entry).unwrap();
        assert_eq!(locator.url, "https://example.com/post");
        assert_eq!(locator.video, None);
        assert_eq!(source.locate(&FeedEntry::default()).unwrap().url, "");
    }

    #[tokio::test]
    async fn test_feeds_concatenate_in_declaration_order_without_dedup() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/news.xml")
            .with_status(200)
            .with_body(rss_with("Shared story", "https://example.com/shared", 1))
            .create_async()
            .await;
        server
            .mock("GET", "/research.xml")
            .with_status(200)
            .with_body(rss_with("Shared story", "https://example.com/shared", 2))
            .create_async()
            .await;

        let source = ServerSource {
            urls: vec![
                format!("{}/news.xml", server.url()),
                format!("{}/research.xml", server.url()),
            ],
        };
        let scraper = FeedScraper::new(Client::new(), source);
        let records = scraper.get_records(24).await;

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.url == "https://example.com/shared"));
        assert!(records[0].published_at > records[1].published_at);
        assert_eq!(records[0].category.as_deref(), Some("News"));
        assert_eq!(records[0].source, "server");
    }

    #[tokio::test]
    async fn test_failed_feed_is_skipped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/down.xml")
            .with_status(503)
            .create_async()
            .await;
        server
            .mock("GET", "/up.xml")
            .with_status(200)
            .with_body(rss_with("Still here", "https://example.com/up", 1))
            .create_async()
            .await;

        let source = ServerSource {
            urls: vec![format!("{}/down.xml", server.url()), format!("{}/up.xml", server.url())],
        };
        let records = FeedScraper::new(Client::new(), source).get_records(24).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Still here");
    }

    #[tokio::test]
    async fn test_old_entries_are_filtered() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/old.xml")
            .with_status(200)
            .with_body(rss_with("Last week", "https://example.com/old", 24 * 7))
            .create_async()
            .await;

        let source = ServerSource {
            urls: vec![format!("{}/old.xml", server.url())],
        };
        let scraper = FeedScraper::new(Client::new(), source);
        assert!(scraper.get_records(24).await.is_empty());

        let wide = scraper.get_records(24 * 8).await;
        assert_eq!(wide.len(), 1);
        assert!(wide[0].published_at.to_rfc3339_opts(SecondsFormat::Secs, true).ends_with('Z'));
    }
}
