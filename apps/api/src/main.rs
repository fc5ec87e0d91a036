mod config;
mod db;
mod documents;
mod errors;
mod models;
mod relevance;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{
    EvaluationStore, InMemoryEvaluationStore, InMemoryJdStore, JdStore, PgEvaluationStore, PgJdStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Relevance API v{}", env!("CARGO_PKG_VERSION"));

    // Stores: Postgres when configured, otherwise volatile memory
    let (store, evaluations): (Arc<dyn JdStore>, Arc<dyn EvaluationStore>) =
        match &config.database_url {
            Some(url) => {
                let pool = create_pool(url).await?;
                ensure_schema(&pool).await?;
                (
                    Arc::new(PgJdStore::new(pool.clone())),
                    Arc::new(PgEvaluationStore::new(pool)),
                )
            }
            None => (
                Arc::new(InMemoryJdStore::new()),
                Arc::new(InMemoryEvaluationStore::new()),
            ),
        };
    info!("Stores initialized (backend: {})", store.backend());

    info!(
        "Extraction mode: {}, verdict scale: {:?}, match threshold: {}",
        config.extraction_mode, config.verdict_scale, config.match_threshold
    );

    let state = AppState::new(config.clone(), store, evaluations);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
