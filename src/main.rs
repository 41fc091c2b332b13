use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use study_stream::config::Config;
use study_stream::db;
use study_stream::service::{TokenSigner, seed};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        token_ttl_secs = cfg.token_ttl_secs,
        seed_catalog = cfg.seed_catalog
    );

    let pool = db::connect(&cfg.database_url, cfg.db_max_connections).await?;

    if cfg.seed_catalog {
        let videos = db::VideoStorage::new(pool.clone());
        if let Err(e) = seed::seed_catalog(&videos).await {
            warn!(error = %e, "failed to seed catalog");
        }
        if let Err(e) = seed::upgrade_insecure_urls(&videos).await {
            warn!(error = %e, "failed to migrate video URLs");
        }
    }

    let signer = TokenSigner::new(&cfg.jwt_secret, cfg.token_ttl_secs);
    let state = study_stream::StudyState::new(pool, signer);
    let app = study_stream::study_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
