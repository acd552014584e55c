//! YouTube channel uploads.
//!
//! Each channel publishes an Atom feed of its most recent uploads. Video
//! records point at the canonical watch URL built from the `yt:videoId`
//! element rather than at the feed's own link, and carry the video and
//! channel ids so transcripts can be looked up afterwards.

use super::{FeedScraper, FeedSource, Locator};
use crate::enrich::{TranscriptFetcher, enrich_records};
use crate::feed::FeedEntry;
use crate::models::{NormalizedRecord, VideoIdentity, VideoKind, video_url};
use reqwest::Client;
use tracing::{info, instrument};

const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

/// Build the uploads feed URL for a channel id.
pub fn feed_url(channel_id: &str) -> String {
    feed_url_on(YOUTUBE_BASE_URL, channel_id)
}

fn feed_url_on(base_url: &str, channel_id: &str) -> String {
    format!(
        "{}/feeds/videos.xml?channel_id={}",
        base_url,
        urlencoding::encode(channel_id)
    )
}

/// The uploads feed of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFeed {
    channel_id: String,
    base_url: String,
}

impl ChannelFeed {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            base_url: YOUTUBE_BASE_URL.to_string(),
        }
    }

    /// Serve the feed from a different host (used against local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl FeedSource for ChannelFeed {
    fn name(&self) -> &str {
        "youtube"
    }

    fn feed_urls(&self) -> Vec<String> {
        vec![feed_url_on(&self.base_url, &self.channel_id)]
    }

    /// Entries without a video id cannot be turned into a watch URL and are dropped.
    fn locate(&self, entry: &FeedEntry) -> Option<Locator> {
        let video_id = entry.video.video_id.clone()?;
        let kind = VideoKind::classify(
            entry.title.as_deref().unwrap_or_default(),
            entry.video.live_broadcast.as_deref(),
        );

        Some(Locator {
            url: video_url(&video_id),
            video: Some(VideoIdentity {
                video_id,
                channel_id: entry
                    .video
                    .channel_id
                    .clone()
                    .or_else(|| Some(self.channel_id.clone())),
                kind,
            }),
        })
    }
}

/// Build a scraper for one channel.
pub fn scraper(client: Client, channel_id: &str) -> FeedScraper<ChannelFeed> {
    FeedScraper::new(client, ChannelFeed::new(channel_id))
}

/// Recent videos of a channel, each with its transcript attached when available.
///
/// # Arguments
///
/// * `scraper` - Scraper for the channel's feed
/// * `transcripts` - Transcript lookup used for every video
/// * `hours` - Window size
/// * `concurrency` - Number of transcript lookups allowed in flight (1 = sequential)
#[instrument(level = "info", skip(scraper, transcripts), fields(channel_id = scraper.source().channel_id()))]
pub async fn scrape_channel(
    scraper: &FeedScraper<ChannelFeed>,
    transcripts: &TranscriptFetcher,
    hours: u32,
    concurrency: usize,
) -> Vec<NormalizedRecord> {
    let mut videos = scraper.get_records(hours).await;
    let with_transcript = enrich_records(transcripts, &mut videos, concurrency).await;
    info!(
        videos = videos.len(),
        with_transcript,
        "Scraped channel"
    );
    videos
}
