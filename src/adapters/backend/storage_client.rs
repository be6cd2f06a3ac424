//! Object storage client. Implements StoragePort over `{base}/storage/v1`.

use crate::domain::DomainError;
use crate::ports::StoragePort;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

/// Escaped in bucket names and object keys; `/` keeps separating key segments.
const OBJECT_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn object_path(bucket: &str, key: &str) -> String {
    format!(
        "{}/{}",
        utf8_percent_encode(bucket, OBJECT_PATH_SET),
        utf8_percent_encode(key, OBJECT_PATH_SET)
    )
}

/// Storage API client (upload-by-key, public URLs).
pub struct RestStorageClient {
    client: Client,
    storage_url: String,
    api_key: String,
}

impl RestStorageClient {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client build failed: {}", e)))?;
        Ok(Self {
            client,
            storage_url: format!("{}/storage/v1", base_url.trim_end_matches('/')),
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl StoragePort for RestStorageClient {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError> {
        let url = format!("{}/object/{}", self.storage_url, object_path(bucket, key));
        let size = bytes.len();

        let res = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| DomainError::Storage(format!("Upload request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            warn!(bucket, key, status = %status, "storage rejected upload");
            return Err(DomainError::Storage(format!(
                "Storage API error {}: {}",
                status, text
            )));
        }

        info!(bucket, key, size, "uploaded object");
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/object/public/{}",
            self.storage_url,
            object_path(bucket, key)
        )
    }
}
