mod config;
mod error;
mod health;
mod routes;
mod solve;
mod state;

use std::sync::Arc;

use axum::serve;
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, routes::app, state::AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    match &config.osrm_url {
        Some(osrm_url) => info!("Using OSRM at {osrm_url} ({})", config.osrm_profile),
        None => info!("OSRM disabled, using haversine matrices"),
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, app).await?;

    Ok(())
}
