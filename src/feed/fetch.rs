//! Feed retrieval over HTTP.

use super::entry::FeedEntry;
use super::parse::parse_feed;
use crate::error::FeedError;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

/// Download and parse one feed document.
///
/// # Errors
///
/// Returns a [`FeedError`] if the request fails, the server answers with a
/// non-success status, or the body is not a recognizable RSS/Atom document.
#[instrument(level = "info", skip(client))]
pub async fn fetch_feed(client: &Client, url: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    debug!(bytes = body.len(), "Downloaded feed body");

    let entries = parse_feed(&body)?;
    info!(count = entries.len(), "Parsed feed entries");
    Ok(entries)
}

/// Fetch a feed, treating any failure as a feed with no entries.
pub async fn fetch_entries_or_empty(client: &Client, url: &str) -> Vec<FeedEntry> {
    match fetch_feed(client, url).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(%url, error = %e, "Feed fetch failed; continuing without it");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATOM: &str = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Hello</title>
    <link href="https://example.com/hello"/>
    <published>2024-01-15T10:30:00Z</published>
  </entry>
</feed>"#;

    #[tokio::test]
    async fn test_fetch_feed_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/feed.xml")
            .with_status(200)
            .with_header("content-type", "application/atom+xml")
            .with_body(ATOM)
            .create_async()
            .await;

        let client = Client::new();
        let url = format!("{}/feed.xml", server.url());
        let entries = fetch_feed(&client, &url).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title.as_deref(), Some("Hello"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_feed_reports_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.xml")
            .with_status(404)
            .create_async()
            .await;

        let client = Client::new();
        let url = format!("{}/missing.xml", server.url());
        let err = fetch_feed(&client, &url).await.unwrap_err();
        assert!(matches!(err, FeedError::Status(404)));
    }

    #[tokio::test]
    async fn test_failures_become_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/broken.xml")
            .with_status(200)
            .with_body("<html><body>maintenance</body></html>")
            .create_async()
            .await;

        let client = Client::new();
        let url = format!("{}/broken.xml", server.url());
        assert!(fetch_entries_or_empty(&client, &url).await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_entry_feed_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/empty.xml")
            .with_status(200)
            .with_body(r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>Nothing</title></feed>"#)
            .create_async()
            .await;

        let client = Client::new();
        let url = format!("{}/empty.xml", server.url());
        assert!(fetch_feed(&client, &url).await.unwrap().is_empty());
    }
}
