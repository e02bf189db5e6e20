use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use tracked_times::modules::time_entries::adapters::outbound::in_memory_store::{
    InMemoryTimeEntryStore, Snapshot,
};
use tracked_times::shell::config::Config;
use tracked_times::shell::graphql::ENDPOINT;
use tracked_times::shell::http::app;
use tracked_times::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load().context("loading configuration")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    fmt().with_env_filter(filter).init();

    // In-memory store for now, optionally seeded from a snapshot
    let store = match &config.seed_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "seeding store from snapshot");
            InMemoryTimeEntryStore::from_snapshot(Snapshot::load(path)?)
                .with_context(|| format!("seeding users from {}", path.display()))?
        }
        None => InMemoryTimeEntryStore::new(),
    };

    let pagination = config.pagination();
    tracing::info!(
        default_page_size = pagination.default_page_size(),
        max_page_size = pagination.max_page_size(),
        "pagination settings"
    );
    let state = AppState::in_memory(Arc::new(store), pagination);

    let addr = config
        .socket_addr()
        .with_context(|| format!("invalid listen_addr {:?}", config.listen_addr))?;
    tracing::info!("REST endpoint: http://{}/user/times", addr);
    tracing::info!("GraphQL endpoint: http://{}{}", addr, ENDPOINT);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
