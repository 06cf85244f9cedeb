use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use crate::contract::Fetcher;
use crate::error::FetchError;

/// Fetches raw source text over HTTP.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, source: &Url) -> Result<String, FetchError> {
        info!(source = %source, "Started getting markdown content");
        let response = self.client.get(source.clone()).send().await.map_err(|e| {
            warn!(source = %source, error = %e, "Request for source content failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(source = %source, status = status.as_u16(), "Source did not answer 200");
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(source = %source, error = %e, "Source body could not be read");
            FetchError::Body(e.to_string())
        })?;
        // Invalid UTF-8 is an error, never lossily replaced.
        let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
            warn!(source = %source, error = %e, "Source body is not valid UTF-8");
            FetchError::Body(e.to_string())
        })?;
        info!(source = %source, bytes = text.len(), "Markdown content downloaded");
        debug!(source = %source, content = %text, "Fetched content");
        Ok(text)
    }
}
