//! Backend entry-point: wires adapters, seeds the task catalog, and serves
//! the REST API.

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ambassador_backend::inbound::http::health::HealthState;
use ambassador_backend::outbound::persistence::{DbPool, PoolConfig};
use ambassador_backend::server::{ServerConfig, build_http_state, create_server};

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

    let config = ServerConfig::from_env()?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;

    let http_state = build_http_state(pool, &config.jwt_secret, &config.upload_dir);

    match http_state.catalog.seed_default_catalog().await {
        Ok(0) => info!("task catalog already seeded"),
        Ok(count) => info!(count, "seeded default task catalog"),
        Err(err) => warn!(error = %err, "task catalog seeding failed; continuing"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        web::Data::new(http_state),
        config.bind_addr,
    )?;

    info!(addr = %config.bind_addr, "listening");
    server.await
}
