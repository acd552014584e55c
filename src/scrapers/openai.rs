//! OpenAI news posts from the first-party RSS feed.

use super::{FeedScraper, VendorFeed};
use reqwest::Client;

pub const FEED_URL: &str = "https://openai.com/news/rss.xml";

pub const SOURCE: VendorFeed = VendorFeed {
    name: "openai",
    feeds: &[FEED_URL],
};

/// Build a scraper for the OpenAI news feed.
pub fn scraper(client: Client) -> FeedScraper<VendorFeed> {
    FeedScraper::new(client, SOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::FeedSource;

    #[test]
    fn test_single_feed() {
        assert_eq!(SOURCE.feed_urls(), vec![FEED_URL.to_string()]);
        assert_eq!(SOURCE.name(), "openai");
    }
}
