//! Anthropic news, research and engineering posts.
//!
//! Anthropic does not publish first-party feeds; these are the community
//! mirrors generated from the website. The three feeds are polled in the
//! order listed in [`FEEDS`] and their records concatenated.

use super::{FeedScraper, VendorFeed};
use reqwest::Client;

/// Feed URLs, in fetch order.
pub const FEEDS: &[&str] = &[
    "https://raw.githubusercontent.com/Olshansk/rss-feeds/main/feeds/feed_anthropic_news.xml",
    "https://raw.githubusercontent.com/Olshansk/rss-feeds/main/feeds/feed_anthropic_research.xml",
    "https://raw.githubusercontent.com/Olshansk/rss-feeds/main/feeds/feed_anthropic_engineering.xml",
];

pub const SOURCE: VendorFeed = VendorFeed {
    name: "anthropic",
    feeds: FEEDS,
};

/// Build a scraper for the Anthropic feeds.
pub fn scraper(client: Client) -> FeedScraper<VendorFeed> {
    FeedScraper::new(client, SOURCE)
}
