//! Shared HTTP client construction.

use reqwest::Client;
use std::time::Duration;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("awful_ai_feeds/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the client every feed fetch and enrichment lookup goes through.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client(user_agent: &str) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_names_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("awful_ai_feeds/"));
    }

    #[tokio::test]
    async fn test_client_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "feeds-test/1.0")
            .with_status(200)
            .create_async()
            .await;

        let client = build_client("feeds-test/1.0").unwrap();
        let response = client.get(server.url()).send().await.unwrap();
        assert!(response.status().is_success());
        mock.assert_async().await;
    }
}
