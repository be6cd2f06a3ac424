//! Resolves image URIs picked on the device into bytes.
//!
//! Accepts plain filesystem paths, `file://` URIs and `http(s)://` URLs.

use crate::domain::DomainError;
use crate::ports::MediaSourcePort;
use reqwest::Client;
use tracing::debug;

pub struct LocalMediaSource {
    client: Client,
}

impl LocalMediaSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Media(format!("{}: {}", url, e)))?;

        if !res.status().is_success() {
            return Err(DomainError::Media(format!("{}: HTTP {}", url, res.status())));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| DomainError::Media(format!("{}: {}", url, e)))?;
        Ok(bytes.to_vec())
    }
}

impl Default for LocalMediaSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MediaSourcePort for LocalMediaSource {
    async fn read(&self, uri: &str) -> Result<Vec<u8>, DomainError> {
        let bytes = if uri.starts_with("http://") || uri.starts_with("https://") {
            self.fetch(uri).await?
        } else {
            let path = uri.strip_prefix("file://").unwrap_or(uri);
            tokio::fs::read(path)
                .await
                .map_err(|e| DomainError::Media(format!("{}: {}", path, e)))?
        };
        debug!(uri, size = bytes.len(), "read media");
        Ok(bytes)
    }
}
