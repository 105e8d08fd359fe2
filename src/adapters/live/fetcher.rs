//! Live adapter for the `Fetcher` port using `reqwest`.

use std::error::Error;

use reqwest::Client;

use crate::ports::fetcher::{FetchFuture, Fetcher};

/// Live fetcher that downloads over HTTPS.
pub struct LiveFetcher {
    client: Client,
}

impl LiveFetcher {
    /// Creates a new live fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for LiveFetcher {
    fn is_available(&self) -> bool {
        true
    }

    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        Box::pin(download(&self.client, url.to_string()))
    }
}

async fn download(client: &Client, url: String) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
    tracing::debug!(%url, "downloading");
    let response =
        client.get(&url).send().await.map_err(|e| format!("Request to {url} failed: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Download of {url} failed with status {}", status.as_u16()).into());
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to read response body from {url}: {e}"))?;
    Ok(bytes.to_vec())
}
