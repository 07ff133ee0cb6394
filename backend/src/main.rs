//! Backend entry-point: loads configuration, wires adapters and serves the blog API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog_backend::inbound::http::health::HealthState;
use blog_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use blog_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

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

    let settings = ServerSettings::from_args(std::env::args_os())?;
    let bind_addr = settings.bind_addr()?;

    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %session.key.fingerprint(),
        ttl_hours = session.ttl.num_hours(),
        "session signing key loaded"
    );

    let mut config = ServerConfig::new(session, bind_addr);
    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections()),
            )
            .await
            .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
            info!("using PostgreSQL persistence");
        }
        None => warn!("BLOG_DATABASE_URL not set; records are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %bind_addr, "starting blog backend");
    create_server(health_state, config)?.await
}
