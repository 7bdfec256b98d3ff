//! Subscriber API entry-point: loads configuration, prepares adapters, serves.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, RunningServer, ServerConfig, create_server};
use subscriber_api::inbound::http::health::HealthState;
use subscriber_api::inbound::http::session_config::{BuildMode, session_settings_from_env};
use subscriber_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(|e| std::io::Error::other(format!("invalid session configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_collaborator_timeout(settings.collaborator_timeout())
    .with_side_effect_queue_capacity(settings.side_effect_queue_capacity());

    if let Some(mail) = settings.mail_api().map_err(std::io::Error::other)? {
        config = config.with_mail_api(mail);
    }

    match settings.database_url().map_err(std::io::Error::other)? {
        Some(database_url) => {
            let pool = prepare_database(database_url).await?;
            config = config.with_db_pool(pool);
        }
        None => warn!("SUBSCRIBERS_DATABASE_URL not set; data lives in memory only"),
    }

    let health_state = web::Data::new(HealthState::new());
    let RunningServer {
        server,
        side_effects,
    } = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "subscriber api listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    side_effects.abort();
    outcome
}

/// Apply migrations and open the connection pool.
async fn prepare_database(database_url: String) -> std::io::Result<DbPool> {
    let migration_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");

    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))
}
