//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, Settings, create_server};
use storefront::inbound::http::health::HealthState;
use storefront::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Build the database pool and apply migrations when a host is configured.
async fn prepare_database(settings: &Settings) -> Result<Option<DbPool>> {
    let Some(params) = settings.connection_params() else {
        return Ok(None);
    };
    let database_url = params
        .to_url()
        .map_err(|err| eyre!(err.into_message()))
        .wrap_err("invalid database settings")?;

    let applied = run_pending_migrations(database_url.clone())
        .await
        .wrap_err("failed to migrate database")?;
    info!(applied, host = %params.host, database = %params.database, "database ready");

    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.db_max_connections())
            .with_connection_timeout(settings.db_connect_timeout()),
    )
    .await
    .map_err(|err| eyre!(err.into_message()))
    .wrap_err("failed to build database pool")?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(bind_addr)
        .with_request_timeout(settings.request_timeout())
        .with_shutdown_timeout(settings.shutdown_timeout());
    if let Some(pool) = prepare_database(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    info!(%bind_addr, "listening");

    // Fail liveness as soon as a shutdown signal arrives so orchestrators
    // stop routing while in-flight requests drain.
    let drain_state = health_state.clone();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            drain_state.mark_unhealthy();
            info!("shutdown signal received; draining");
            handle.stop(true).await;
        }
    });

    server.await?;
    health_state.mark_unhealthy();
    info!("server stopped");
    Ok(())
}
