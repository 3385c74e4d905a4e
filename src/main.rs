use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use moviematch_api::config::Config;
use moviematch_api::db::{self, Cache};
use moviematch_api::routes::{create_router, AppState};
use moviematch_api::services::providers::tmdb::TmdbProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db_pool = db::create_pool(&config.database_url).await?;
    let questions = db::load_questions(&db_pool).await?;

    let redis_client = db::create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    let provider = TmdbProvider::new(
        cache,
        config.tmdb_access_token.clone(),
        config.tmdb_api_url.clone(),
    );

    let state = Arc::new(AppState {
        questions,
        catalog: Arc::new(provider),
        watch_region: config.watch_region.clone(),
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush queued cache writes before the process exits
    cache_writer.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
