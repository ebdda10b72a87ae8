//! Backend entry-point: seeds the in-memory stores and serves the REST API.

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::{ServerConfig, create_server};

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

    let config = ServerConfig::from_env();
    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());

    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server started");
    server.await
}
