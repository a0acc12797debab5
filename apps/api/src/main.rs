use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prep_api::analysis::heuristics::Heuristics;
use prep_api::config::Config;
use prep_api::history::repository::HistoryRepository;
use prep_api::history::store::{KeyValueStore, MemoryStore, RedisStore};
use prep_api::routes::build_router;
use prep_api::state::AppState;

/// Redis keys are namespaced so the service can share an instance.
const REDIS_KEY_PREFIX: &str = "prep:";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{crate_name}={level},tower_http={level}",
                crate_name = env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting prep API v{}", env!("CARGO_PKG_VERSION"));

    let heuristics = Heuristics::load(config.heuristics_path.as_deref())?;

    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url, REDIS_KEY_PREFIX).await?;
            info!("History store: Redis");
            Arc::new(store)
        }
        None => {
            warn!("REDIS_URL not set, history is kept in memory and lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState {
        history: HistoryRepository::new(store, config.history_key.clone()),
        heuristics: Arc::new(heuristics),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
