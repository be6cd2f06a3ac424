//! Wiring & DI. Entry point: bootstrap adapters, inject into the gateways and
//! print one snapshot of each board. No business logic here.
//!
//! Usage: `campus-gateway [COURSE_ID]` (teaming board defaults to COMP3015).

use campus_gateway::adapters::backend::{RestQueryClient, RestStorageClient};
use campus_gateway::adapters::media::LocalMediaSource;
use campus_gateway::adapters::memory::InMemoryStore;
use campus_gateway::ports::{MediaSourcePort, QueryPort, StoragePort};
use campus_gateway::shared::config::AppConfig;
use campus_gateway::usecases::{ExchangeService, FeedService, TeamingService};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_COURSE_ID: &str = "COMP3015";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_default();
    let settings = cfg.gateway_settings();

    // --- Backend: hosted REST + storage, or the in-memory stand-in ---
    let (query, storage): (Arc<dyn QueryPort>, Arc<dyn StoragePort>) =
        match (cfg.backend_url.as_deref(), cfg.api_key.clone()) {
            (Some(url), Some(key)) if cfg.is_backend_configured() => {
                let timeout = cfg.request_timeout_or_default();
                info!(url, timeout_secs = timeout.as_secs(), "using hosted backend");
                (
                    Arc::new(RestQueryClient::new(url, key.clone(), timeout)?) as Arc<dyn QueryPort>,
                    Arc::new(RestStorageClient::new(url, key, timeout)?) as Arc<dyn StoragePort>,
                )
            }
            _ => {
                warn!("CAMPUS_BACKEND_URL / CAMPUS_API_KEY not set, using in-memory store");
                let store = Arc::new(InMemoryStore::new());
                (
                    Arc::clone(&store) as Arc<dyn QueryPort>,
                    store as Arc<dyn StoragePort>,
                )
            }
        };
    let media: Arc<dyn MediaSourcePort> = Arc::new(LocalMediaSource::new());

    // --- Gateways ---
    let feed = FeedService::new(Arc::clone(&query), storage, media, settings.clone());
    let exchanges = ExchangeService::new(Arc::clone(&query), &settings);
    let teaming = TeamingService::new(query, &settings);

    // --- Snapshot ---
    let course_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_COURSE_ID.to_string());

    let posts = feed.posts(None).await;
    info!(count = posts.len(), live = posts.is_live(), "feed");

    let open = exchanges.fetch_exchanges().await;
    info!(count = open.len(), live = open.is_live(), "exchange board");
    for exchange in open.items() {
        info!(
            id = %exchange.id,
            have = %exchange.have.code,
            wants = exchange.want_courses.len(),
            likes = exchange.likes,
            "exchange"
        );
    }

    let requests = teaming.fetch_teaming_requests(&course_id).await;
    info!(
        course_id = %course_id,
        count = requests.len(),
        live = requests.is_live(),
        "teaming board"
    );

    println!("{}", serde_json::to_string_pretty(open.items())?);

    Ok(())
}
