use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;

use super::types::{Entry, ProxyRequest, ProxyResponse};

pub const DEFAULT_PROXY_URL: &str = "https://rsstojson.udacity.com/parseFeed";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
    #[error("malformed proxy response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Turns a feed url into its entries. The XML work happens on the other side.
pub trait FeedProxy: Send + Sync + 'static {
    fn parse_feed(
        &self,
        feed_url: &str,
    ) -> impl Future<Output = Result<Vec<Entry>, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpFeedProxy {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFeedProxy {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim().to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl FeedProxy for HttpFeedProxy {
    async fn parse_feed(&self, feed_url: &str) -> Result<Vec<Entry>, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&ProxyRequest { url: feed_url })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: ProxyResponse = serde_json::from_slice(&body)?;
        Ok(parsed.feed.entries)
    }
}
