//! Application configuration. Backend endpoint, credentials, gateway tuning.

use serde::Deserialize;
use std::time::Duration;

/// Default page size for feed reads.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Author id that short-circuits post creation to a local fabricated post.
pub const DEFAULT_DEMO_AUTHOR_ID: &str = "demo_user";

/// Storage bucket holding post images (publicly readable).
pub const DEFAULT_STORAGE_BUCKET: &str = "posts";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Backend base URL (e.g. https://xyz.supabase.co). Read from CAMPUS_BACKEND_URL.
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Anon/service API key sent as `apikey` and bearer token. Read from CAMPUS_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Bucket for post images. Read from CAMPUS_STORAGE_BUCKET.
    #[serde(default)]
    pub storage_bucket: Option<String>,

    /// Demo sentinel author id. Read from CAMPUS_DEMO_AUTHOR_ID.
    #[serde(default)]
    pub demo_author_id: Option<String>,

    /// Artificial delay before a demo post resolves. Read from CAMPUS_DEMO_DELAY_MS.
    #[serde(default)]
    pub demo_delay_ms: Option<u64>,

    /// Feed page size when the caller passes none. Read from CAMPUS_PAGE_SIZE.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Per-request HTTP timeout. Read from CAMPUS_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Compare-and-swap attempts per counter increment. Read from CAMPUS_COUNTER_ATTEMPTS.
    #[serde(default)]
    pub counter_attempts: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("CAMPUS"));
        if let Ok(path) = std::env::var("CAMPUS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// True when both the backend URL and API key are present.
    pub fn is_backend_configured(&self) -> bool {
        self.backend_url.as_deref().is_some_and(|u| !u.is_empty())
            && self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn storage_bucket_or_default(&self) -> String {
        self.storage_bucket
            .clone()
            .unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string())
    }

    pub fn demo_author_id_or_default(&self) -> String {
        self.demo_author_id
            .clone()
            .unwrap_or_else(|| DEFAULT_DEMO_AUTHOR_ID.to_string())
    }

    /// Defaults to 1000 ms.
    pub fn demo_delay_ms_or_default(&self) -> u64 {
        self.demo_delay_ms.unwrap_or(1000)
    }

    /// Defaults to DEFAULT_PAGE_SIZE; zero is treated as unset.
    pub fn page_size_or_default(&self) -> usize {
        match self.page_size {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(n) => n,
        }
    }

    /// Defaults to 10 seconds.
    pub fn request_timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(10))
    }

    /// Defaults to 5; at least one attempt is always made.
    pub fn counter_attempts_or_default(&self) -> u32 {
        self.counter_attempts.unwrap_or(5).max(1)
    }

    /// Tuning handed to the gateways.
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            storage_bucket: self.storage_bucket_or_default(),
            demo_author_id: self.demo_author_id_or_default(),
            demo_delay: Duration::from_millis(self.demo_delay_ms_or_default()),
            page_size: self.page_size_or_default(),
            counter_attempts: self.counter_attempts_or_default(),
        }
    }
}

/// Gateway tuning resolved from `AppConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub storage_bucket: String,
    pub demo_author_id: String,
    pub demo_delay: Duration,
    pub page_size: usize,
    pub counter_attempts: u32,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        AppConfig::default().gateway_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GatewaySettings::default();
        assert_eq!(settings.storage_bucket, "posts");
        assert_eq!(settings.demo_author_id, "demo_user");
        assert_eq!(settings.demo_delay, Duration::from_millis(1000));
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.counter_attempts, 5);
    }

    #[test]
    fn test_backend_needs_url_and_key() {
        let mut cfg = AppConfig {
            backend_url: Some("https://campus.example".into()),
            ..AppConfig::default()
        };
        assert!(!cfg.is_backend_configured());
        cfg.api_key = Some(String::new());
        assert!(!cfg.is_backend_configured());
        cfg.api_key = Some("anon".into());
        assert!(cfg.is_backend_configured());
    }

    #[test]
    fn test_zero_values_fall_back() {
        let cfg = AppConfig {
            page_size: Some(0),
            counter_attempts: Some(0),
            ..AppConfig::default()
        };
        assert_eq!(cfg.page_size_or_default(), DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.counter_attempts_or_default(), 1);
    }
}
